//! Transcript preparation applied before each planning call.
//!
//! Trimming only changes what the planner *sees*; the transcript itself and
//! its token accounting always cover the full history.

use std::borrow::Cow;
use std::fmt;

use stride_core::transcript::Step;

/// Caller-supplied trim function.
pub type TrimFn = Box<dyn Fn(&[Step]) -> Vec<Step> + Send + Sync>;

/// How to prepare the transcript view for planning.
pub enum TrimPolicy {
    /// Pass the full transcript through.
    None,
    /// Keep only the most recent `n` steps.
    KeepLast(usize),
    /// Arbitrary caller-supplied preparation.
    Custom(TrimFn),
}

impl Default for TrimPolicy {
    fn default() -> Self {
        Self::None
    }
}

impl fmt::Debug for TrimPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::KeepLast(n) => f.debug_tuple("KeepLast").field(n).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl TrimPolicy {
    /// Produce the planner's view of `steps`. Borrows when nothing changes.
    #[must_use]
    pub fn apply<'a>(&self, steps: &'a [Step]) -> Cow<'a, [Step]> {
        match self {
            Self::None => Cow::Borrowed(steps),
            Self::KeepLast(n) => {
                if steps.len() <= *n {
                    Cow::Borrowed(steps)
                } else {
                    Cow::Owned(steps[steps.len() - n..].to_vec())
                }
            }
            Self::Custom(f) => Cow::Owned(f(steps)),
        }
    }
}
