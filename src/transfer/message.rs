//! Pull request text derived from a commit message

/// Pull request body: the commit message with the subject removed
///
/// Every literal occurrence of the subject is removed, including repetitions
/// inside the body text.
pub fn strip_subject(subject: &str, message: &str) -> String {
    if subject.is_empty() {
        return message.to_string();
    }
    message.replace(subject, "")
}
