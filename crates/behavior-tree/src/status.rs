//! Status returned by behavior nodes.

/// The result of ticking a behavior node.
///
/// # Tick Semantics
///
/// Every tick resolves to exactly one of [`Running`](Status::Running),
/// [`Success`](Status::Success) or [`Failure`](Status::Failure). The
/// [`Invalid`](Status::Invalid) variant only exists as the unset value and is
/// never a legal tick outcome.
///
/// Only equality is meaningful; there is no ordering between variants.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Status {
    /// Unset status. Observing this as a tick result is a contract violation.
    #[default]
    Invalid,

    /// The behavior has not reached a definite outcome yet and must be
    /// ticked again.
    Running,

    /// The behavior completed successfully.
    ///
    /// For conditionals: the predicate held.
    /// For tasks: the work finished.
    Success,

    /// The behavior failed.
    ///
    /// For conditionals: the predicate did not hold.
    /// For tasks: the work could not be completed.
    Failure,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Returns `true` for the definite outcomes `Success` and `Failure`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Success | Status::Failure)
    }

    /// Returns `false` only for `Invalid`.
    #[inline]
    pub fn is_valid(self) -> bool {
        !matches!(self, Status::Invalid)
    }

    /// Static snake_case label for logs.
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Inverts the status: Success becomes Failure and vice versa.
    ///
    /// `Running` and `Invalid` are returned unchanged.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            other => other,
        }
    }
}
