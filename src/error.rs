//! Error types for PCD decoding.

use core::fmt;

/// The main error type for PCD decoding operations.
#[derive(Debug)]
pub enum Error {
    /// An I/O error from the underlying file.
    Io(std::io::Error),
    /// Errors related to the PCD container structure.
    Container(ContainerError),
    /// Errors related to Huffman tables and the compressed delta streams.
    Huffman(HuffmanError),
    /// Errors related to the 64Base IPE companion file set.
    Ipe(IpeError),
}

/// Errors related to the PCD container structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// The primary file could not be opened.
    CouldNotOpen,
    /// The file is shorter than the fixed header area.
    TooSmall,
    /// Neither the IPI nor the overview signature is present.
    InvalidSignature,
    /// The image pack carries interleaved ADPCM audio.
    InterleavedAudio,
    /// No base image could be read at any resolution.
    NoBaseImage,
}

/// Errors related to Huffman tables and the compressed delta streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanError {
    /// A code table entry declares a code longer than 16 bits.
    CodeTooLong,
    /// The code table region ended before all entries were read.
    TruncatedTable,
    /// The file ended in the middle of a Huffman sequence.
    UnexpectedEof,
    /// A sequence header carries an invalid plane tag.
    InvalidPlane,
}

/// Errors related to the 64Base IPE companion file set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpeError {
    /// No companion file was supplied for a 64Base decode.
    MissingCompanion,
    /// The companion file name is too short to be valid.
    NameTooShort,
    /// The companion file could not be opened.
    CouldNotOpen,
    /// The companion file is smaller than its descriptor area.
    TooSmall,
    /// The layer count is neither 1 nor 3.
    InvalidLayerCount,
    /// The extension-file count is out of range.
    InvalidFileCount,
    /// A layer descriptor is malformed.
    InvalidDescriptor,
    /// An extension image file could not be opened.
    ExtensionNotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{e}"),
            Self::Container(e) => write!(f, "{e}"),
            Self::Huffman(e) => write!(f, "{e}"),
            Self::Ipe(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CouldNotOpen => write!(f, "could not open PCD file"),
            Self::TooSmall => write!(f, "PCD file is too small to be valid"),
            Self::InvalidSignature => write!(f, "not a valid PCD file"),
            Self::InterleavedAudio => write!(f, "the file contains interleaved audio"),
            Self::NoBaseImage => write!(f, "no valid base image could be found"),
        }
    }
}

impl fmt::Display for HuffmanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CodeTooLong => write!(f, "Huffman code error"),
            Self::TruncatedTable => write!(f, "Huffman code table is truncated"),
            Self::UnexpectedEof => write!(f, "unexpected end of file in Huffman sequence"),
            Self::InvalidPlane => write!(f, "corrupt image: invalid plane in sequence header"),
        }
    }
}

impl fmt::Display for IpeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCompanion => write!(f, "no 64Base IPE companion file was supplied"),
            Self::NameTooShort => write!(f, "IPE filename too short to be valid"),
            Self::CouldNotOpen => write!(f, "could not open 64Base IPE file"),
            Self::TooSmall => write!(f, "64Base IPE file is too small to be valid"),
            Self::InvalidLayerCount => write!(f, "invalid number of 64Base layers"),
            Self::InvalidFileCount => write!(f, "invalid number of 64Base extension files"),
            Self::InvalidDescriptor => write!(f, "invalid 64Base layer descriptor"),
            Self::ExtensionNotFound => write!(f, "could not open 64Base extension image"),
        }
    }
}

impl std::error::Error for Error {}
impl std::error::Error for ContainerError {}
impl std::error::Error for HuffmanError {}
impl std::error::Error for IpeError {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ContainerError> for Error {
    fn from(e: ContainerError) -> Self {
        Self::Container(e)
    }
}

impl From<HuffmanError> for Error {
    fn from(e: HuffmanError) -> Self {
        Self::Huffman(e)
    }
}

impl From<IpeError> for Error {
    fn from(e: IpeError) -> Self {
        Self::Ipe(e)
    }
}

/// Result type for PCD decoding operations.
pub type Result<T> = core::result::Result<T, Error>;

/// A non-fatal decode problem that lowered the delivered resolution.
///
/// `parse_file` still succeeds when a higher resolution tier cannot be
/// decoded; the failing tier's deltas are discarded and the decode falls back
/// to the next tier down. The cause is kept here for diagnostics.
#[derive(Debug)]
pub enum Downgrade {
    /// The 4Base deltas failed to decode; the image fell back to Base.
    FourBase(Error),
    /// The 16Base deltas failed to decode; the image fell back to 4Base.
    SixteenBase(Error),
    /// The 64Base companion failed to decode; the image fell back to 16Base.
    SixtyFourBase(Error),
}

impl fmt::Display for Downgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FourBase(e) => {
                write!(f, "{e} while processing the 4Base image; falling back to Base")
            }
            Self::SixteenBase(e) => {
                write!(f, "{e} while processing the 16Base image; falling back to 4Base")
            }
            Self::SixtyFourBase(e) => {
                write!(f, "{e} while processing the 64Base image; falling back to 16Base")
            }
        }
    }
}

macro_rules! bail {
    ($err:expr) => {
        return Err($err.into())
    };
}

pub(crate) use bail;
