//! Remote job postings: collection, normalization and feature derivation.
//!
//! The enrichment core (`text`, `salary`, `skills`, `role`, `region`,
//! `pipeline`) is pure and synchronous. Fetching, HTML extraction, source
//! adapters and dataset I/O live in their own modules and feed the core
//! with [`RawPosting`] records.

pub mod dataset;
pub mod error;
pub mod fetch;
pub mod html;
pub mod pipeline;
pub mod region;
pub mod role;
pub mod salary;
pub mod settings;
pub mod skills;
pub mod sources;
pub mod summary;
pub mod text;
pub mod vocab;

pub use error::PipelineError;
pub use pipeline::{EnrichedPosting, Enricher, RawPosting};
pub use region::Region;
pub use role::RoleCategory;
pub use salary::{SalaryEstimate, SalaryUnit};
pub use settings::Settings;
pub use vocab::Vocabulary;
