/// Feedback shown next to the form. Each transition replaces the previous one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

impl Status {
    pub fn message(&self) -> Option<&str> {
        match self {
            Status::Succeeded(message) | Status::Failed(message) => Some(message),
            Status::Idle | Status::Pending => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Status::Pending)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Failed(_))
    }
}
