//! Signature script detection
//!
//! Signature scripts are never logged directly. They show up as side
//! effects that follow most casts of the scribed ability, so detection
//! measures how consistently each candidate effect follows a cast.
//!
//! # Architecture
//!
//! ```text
//!        known ability ID ──► ExactMatchResolver ──► DetectionResult (1.0)
//!                                   │ miss
//!                                   ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  CandidateFilter         drop base-ability and unknown effects   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                   │
//!                                   ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  EventCorrelator         effects in (t, t + 1000ms], same player │
//! └─────────────────────────────────────────────────────────────────┘
//!                                   │  CastWindow per cast
//!                                   ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ConsistencyAggregator   tally = casts the candidate appeared in │
//! └─────────────────────────────────────────────────────────────────┘
//!                                   │  ConsistencyReport
//!                                   ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  SignatureSelector       >= 50% threshold, rank, cap at 0.95     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                   │  Selection
//!                                   ▼
//!                    build_evidence ──► DetectionResult
//! ```

mod aggregator;
mod batch;
mod correlator;
mod detector;
mod error;
mod evidence;
mod exact_match;
mod filter;
mod selector;


pub use aggregator::{ConsistencyAggregator, ConsistencyReport, OccurrenceTally};
pub use batch::{AbilityDetection, DetectionOutcome, analyze_fight};
pub use correlator::{CandidateKey, CastWindow, EventCorrelator};
pub use detector::SignatureDetector;
pub use error::DetectionError;
pub use evidence::build_evidence;
pub use exact_match::{EXACT_MATCH_CONFIDENCE, ExactMatchResolver};
pub use filter::{CandidateFilter, FilterPolicy};
pub use selector::{RankedCandidate, Selection, SignatureSelector};
