/// Crate-wide error type. Every failure aborts the run it happens in.
pub mod error;

/// Provider settings, resolved once at startup.
pub mod config;

/// Labelled embedding vectors and their assembly into a rectangular table.
pub mod sample;

/// Principal component analysis via singular value decomposition:
/// mean-centering, principal basis and projection.
pub mod decomp;

/// Sources of embeddings: the OpenAI / Azure OpenAI HTTP client and
/// pre-computed embeddings stored as JSON.
pub mod embed;

/// Labelled plane coordinates, their CSV rendering and the sinks they are written to.
pub mod table;

/// End-to-end run: embed, assemble, project, persist.
pub mod pipeline;

pub use error::{Error, Result};
pub use sample::{Sample, SampleTable};
pub use embed::EmbeddingSource;
pub use table::{ResultRow, Sink, FileSink};
pub use pipeline::Outcome;
