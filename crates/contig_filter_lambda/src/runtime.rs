pub use contig_filter_core::{contract, filter, refs, workspace};
