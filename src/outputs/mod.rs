//! Output generation for the annotated corpus.
//!
//! # Submodules
//!
//! - [`json`]: Writes annotated articles to per-date JSON files plus an index
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! ├── 2025-09-01.json   # every article dated 2025-09-01, input order
//! ├── 2025-09-02.json
//! └── index.json        # dates, article counts, file names
//! ```

pub mod json;
