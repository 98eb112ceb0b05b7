use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Semantic classification of a raised [`Exception`](super::Exception).
///
/// Kinds form a tree rooted at [`ErrorKind::Generic`]. Matching against a
/// registered kind walks this tree upwards, so a mapping for `InvalidArgument`
/// also applies to `TypeMismatch` unless `TypeMismatch` has its own.
///
/// The `Display` form is the stable label used in JSON error bodies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum ErrorKind {
    /// Uncaught or unclassified runtime fault.
    #[strum(serialize = "EX")]
    Generic,

    /// The caller supplied an invalid value.
    #[strum(serialize = "BAD")]
    InvalidArgument,

    /// Domain fault whose message is meant for the user.
    #[strum(serialize = "USER-EX")]
    UserFault,

    #[strum(serialize = "NOT-FOUND")]
    NotFound,

    /// Fault type with a statically declared `400 bad request error!!`.
    #[strum(serialize = "BAD-REQUEST")]
    BadRequest,

    /// A request parameter could not be converted to the handler's type.
    #[strum(serialize = "TYPE-MISMATCH")]
    TypeMismatch,
}

impl ErrorKind {
    /// Direct parent in the kind tree. `Generic` is the root.
    pub const fn parent(self) -> Option<ErrorKind> {
        match self {
            ErrorKind::Generic => None,
            ErrorKind::InvalidArgument
            | ErrorKind::UserFault
            | ErrorKind::NotFound
            | ErrorKind::BadRequest => Some(ErrorKind::Generic),
            ErrorKind::TypeMismatch => Some(ErrorKind::InvalidArgument),
        }
    }

    /// This kind followed by each of its ancestors, nearest first.
    pub fn ancestors(self) -> impl Iterator<Item = ErrorKind> {
        std::iter::successors(Some(self), |kind| kind.parent())
    }

    /// Number of parent hops from `self` up to `ancestor`.
    ///
    /// `Some(0)` for the kind itself, `None` when `ancestor` is not on the path
    /// to the root.
    pub fn distance_to(self, ancestor: ErrorKind) -> Option<usize> {
        self.ancestors().position(|kind| kind == ancestor)
    }

    pub fn is_a(self, ancestor: ErrorKind) -> bool {
        self.distance_to(ancestor).is_some()
    }

    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// Picks the entry registered for the kind closest to `kind`.
///
/// Entries whose kind is not `kind` or one of its ancestors are ignored. When
/// the same kind appears more than once the earliest entry wins.
pub fn most_specific<T>(
    kind: ErrorKind,
    entries: impl IntoIterator<Item = (ErrorKind, T)>,
) -> Option<(ErrorKind, T)> {
    entries
        .into_iter()
        .filter_map(|(registered, value)| {
            kind.distance_to(registered)
                .map(|distance| (distance, registered, value))
        })
        .min_by_key(|(distance, _, _)| *distance)
        .map(|(_, registered, value)| (registered, value))
}
