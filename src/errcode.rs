//! ASE error codes.

use std::io;

pub type AseResult<T> = Result<T, AseError>;

quick_error! {
    #[derive(Debug)]
    pub enum AseError {
        /// The document header did not carry the ASE magic.
        InvalidFile {
            description("Invalid file")
            display("Invalid file")
        }

        /// A frame header did not carry the frame magic.
        InvalidFrameHeader {
            description("Invalid frame header")
            display("Invalid frame header")
        }

        /// A field held a value the format does not define.
        Corrupted(what: &'static str) {
            description("Corrupted")
            display("Corrupted {}", what)
        }

        /// Inflating a compressed cel failed or produced too few bytes.
        Decompression(err: io::Error) {
            description("Decompression error")
            display("Decompression error: {}", err)
            cause(err)
        }

        /// A buffer sized from a declared length could not be allocated.
        Allocation {
            description("Allocation failure")
            display("Allocation failure")
        }

        // IO error.
        Io(err: io::Error) {
            from()
            description("IO error")
            display("IO error: {}", err)
            cause(err)
        }
    }
}
