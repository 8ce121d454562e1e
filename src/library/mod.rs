//! Exercise content: the image library and the sentence bank.
//!
//! The image library is a folder tree where each subfolder names a class and
//! holds that class's images. The sentence bank is a CSV file with a
//! `sentence` column.

mod scan;
mod sentences;

pub use scan::{Card, ImageClass, ImageLibrary, LibraryError};
pub use sentences::{SentenceBank, SentenceError};
