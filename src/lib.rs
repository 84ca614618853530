//! Dominant Speaker Identification Engine
//!
//! Given a stream of per-participant audio-level reports tagged by RTP
//! synchronization source identifier (SSRC), this engine tracks which
//! participant is currently dominating speech in a multipoint conference and
//! notifies observers whenever that identity changes.
//!
//! The statistical model — three overlapping time scales (immediate/medium/
//! long) scored with a binomial log-likelihood function, and a three-
//! threshold global decision rule with a medium-activity tie-break — is
//! described in Volfin and Cohen, "Dominant Speaker Identification for
//! Multipoint Videoconferencing".
//!
//! RTP packet reception, audio-level extraction from the RTP header
//! extension, and thread-pool provisioning are the host application's
//! concern; this crate consumes only a [`Clock`] and a [`Spawner`].

mod clock;
mod conference;
mod constants;
mod decision;
mod error;
mod observer;
mod scoring;
mod speaker;
mod spawner;

pub use clock::{Clock, SystemClock};
pub use conference::Conference;
pub use error::SpawnError;
pub use observer::ObserverHandle;
pub use spawner::{Spawner, TokioSpawner};

/// Synchronization source identifier, as carried on every RTP packet.
pub type Ssrc = u32;
