// Ingestion boundary for profiles and jobs.
// Everything entering the stores is validated here; the engine assumes
// well-formed records.

pub mod handlers;
pub mod validation;
