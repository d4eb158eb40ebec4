//! Office Open XML (OOXML) output.
//!
//! Only the WordprocessingML main document content is produced here; the
//! package container, content types and relationships belong to the caller.
pub mod docx;
