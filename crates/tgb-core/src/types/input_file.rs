use std::{fmt, path::Path};

use serde::{Serialize, Serializer};

use crate::Result;

/// File sent to Telegram: an existing file id, a URL Telegram downloads, or raw bytes.
///
/// Uploads are serialized as `attach://<file_name>`; the transport adds the matching
/// multipart part.
#[derive(Clone, PartialEq, Eq)]
pub enum InputFile {
    FileId(String),
    Url(String),
    Upload { file_name: String, bytes: Vec<u8> },
}

impl InputFile {
    pub fn file_id(id: impl Into<String>) -> Self {
        InputFile::FileId(id.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        InputFile::Url(url.into())
    }

    pub fn upload(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        InputFile::Upload {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a local file into an upload named after its file name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Ok(InputFile::Upload { file_name, bytes })
    }

    pub fn is_upload(&self) -> bool {
        matches!(self, InputFile::Upload { .. })
    }

    /// Value placed in the request parameters for this file.
    pub fn wire_value(&self) -> String {
        match self {
            InputFile::FileId(id) => id.clone(),
            InputFile::Url(url) => url.clone(),
            InputFile::Upload { file_name, .. } => format!("attach://{file_name}"),
        }
    }
}

impl fmt::Debug for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFile::FileId(id) => f.debug_tuple("FileId").field(id).finish(),
            InputFile::Url(url) => f.debug_tuple("Url").field(url).finish(),
            InputFile::Upload { file_name, bytes } => f
                .debug_struct("Upload")
                .field("file_name", file_name)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

impl Serialize for InputFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.wire_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_wire_string() {
        assert_eq!(serde_json::to_value(InputFile::file_id("AgAC")).unwrap(), json!("AgAC"));
        assert_eq!(
            serde_json::to_value(InputFile::upload("cat.png", vec![1, 2, 3])).unwrap(),
            json!("attach://cat.png")
        );
    }

    #[test]
    fn debug_hides_bytes() {
        let dbg = format!("{:?}", InputFile::upload("a.bin", vec![0u8; 2048]));
        assert_eq!(dbg, "Upload { file_name: \"a.bin\", len: 2048 }");
    }

    #[test]
    fn missing_path_is_io_error() {
        let err = InputFile::from_path("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
