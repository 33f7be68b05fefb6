//! Error types for the Waypoint core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, io};

use thiserror::Error;

use crate::{catalog::NodeName, search::SearchStrategy};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while building a [`crate::NodeCatalog`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog contained no entries.
    #[error("node catalog contains no entries")]
    Empty,
    /// An entry had a blank name.
    #[error("catalog entry {line} has an empty name")]
    EmptyName {
        /// One-based position of the offending entry.
        line: usize,
    },
    /// Two entries shared the same name.
    #[error("catalog contains `{name}` more than once")]
    DuplicateName {
        /// The repeated node name.
        name: NodeName,
    },
    /// Reading catalog entries from an input stream failed.
    #[error("failed to read catalog: {source}")]
    Io {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`CatalogError`] variants.
    enum CatalogErrorCode for CatalogError {
        /// The catalog contained no entries.
        Empty => Empty => "CATALOG_EMPTY",
        /// An entry had a blank name.
        EmptyName => EmptyName { .. } => "CATALOG_EMPTY_NAME",
        /// Two entries shared the same name.
        DuplicateName => DuplicateName { .. } => "CATALOG_DUPLICATE_NAME",
        /// Reading catalog entries failed.
        Io => Io { .. } => "CATALOG_IO",
    }
}

/// Error type produced when configuring or running graph synthesis and search.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum WaypointError {
    /// Every synthesis attempt produced a graph without a full tour.
    #[error("no connected graph over {node_count} nodes after {attempts} attempts")]
    GenerationExhausted {
        /// Number of attempts made before giving up.
        attempts: usize,
        /// Number of nodes sampled per attempt.
        node_count: usize,
    },
    /// The graph admits no hop-valid path visiting every node.
    #[error("no valid path visits all {node_count} nodes")]
    NoValidPath {
        /// Size of the node set that was searched.
        node_count: usize,
    },
    /// The exclusive upper cost bound did not exceed the lower bound.
    #[error("cost range [{min}, {max}) is empty; max must exceed min")]
    InvalidCostRange {
        /// Inclusive lower bound supplied by the caller.
        min: u64,
        /// Exclusive upper bound supplied by the caller.
        max: u64,
    },
    /// The edge probability was not a number in `[0, 1]`.
    #[error("edge probability must lie in [0, 1] (got {got})")]
    InvalidProbability {
        /// The rejected probability.
        got: f64,
    },
    /// The retry bound must allow at least one attempt.
    #[error("max_tries must be at least 1 (got {got})")]
    InvalidMaxTries {
        /// The rejected retry bound.
        got: usize,
    },
    /// Exhaustive search was requested over more nodes than the ceiling allows.
    #[error("{requested} nodes exceeds the exhaustive search ceiling of {ceiling}")]
    TooManyNodes {
        /// Effective node count after clamping to the catalog.
        requested: usize,
        /// Configured ceiling.
        ceiling: usize,
    },
    /// The requested search strategy is unavailable in the current build.
    #[error("the requested search strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: SearchStrategy,
    },
    /// An edge connected a node to itself.
    #[error("edge from `{node}` to itself is not allowed")]
    SelfLoop {
        /// The node on both ends of the edge.
        node: NodeName,
    },
}

define_error_codes! {
    /// Stable codes describing [`WaypointError`] variants.
    enum WaypointErrorCode for WaypointError {
        /// Every synthesis attempt produced a disconnected graph.
        GenerationExhausted => GenerationExhausted { .. } => "WAYPOINT_GENERATION_EXHAUSTED",
        /// The graph admits no hop-valid full path.
        NoValidPath => NoValidPath { .. } => "WAYPOINT_NO_VALID_PATH",
        /// The cost range was empty.
        InvalidCostRange => InvalidCostRange { .. } => "WAYPOINT_INVALID_COST_RANGE",
        /// The edge probability was out of range.
        InvalidProbability => InvalidProbability { .. } => "WAYPOINT_INVALID_PROBABILITY",
        /// The retry bound was zero.
        InvalidMaxTries => InvalidMaxTries { .. } => "WAYPOINT_INVALID_MAX_TRIES",
        /// The node count exceeded the search ceiling.
        TooManyNodes => TooManyNodes { .. } => "WAYPOINT_TOO_MANY_NODES",
        /// The requested search strategy is not compiled in.
        BackendUnavailable => BackendUnavailable { .. } => "WAYPOINT_BACKEND_UNAVAILABLE",
        /// An edge looped back onto its source.
        SelfLoop => SelfLoop { .. } => "WAYPOINT_SELF_LOOP",
    }
}

impl WaypointError {
    /// Returns `true` for errors the caller can retry with relaxed parameters.
    ///
    /// # Examples
    /// ```
    /// use waypoint_core::WaypointError;
    ///
    /// let err = WaypointError::GenerationExhausted { attempts: 3, node_count: 4 };
    /// assert!(err.is_recoverable());
    /// assert!(!WaypointError::NoValidPath { node_count: 4 }.is_recoverable());
    /// ```
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::GenerationExhausted { .. })
    }

    /// Returns `true` when the error stems from invalid configuration.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidCostRange { .. }
                | Self::InvalidProbability { .. }
                | Self::InvalidMaxTries { .. }
                | Self::TooManyNodes { .. }
                | Self::BackendUnavailable { .. }
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, WaypointError>;
