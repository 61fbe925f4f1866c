use std::{fs, io::Read, path::PathBuf};

use azure_storage::StorageCredentials;
use url::Url;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub enum BlobAuth {
    SASToken(),
    // adds `;managed_identity=<identity>` to the blob path
    UserAssignedManagedIdentity(String),
    // adds `;managed_identity=system` to the blob path
    SystemAssignedManagedIdentity
}

#[derive(Clone, Debug)]
pub struct BlobDescriptor {
    uri: Url,
    pub(crate) size: Option<u64>,
    pub(crate) source_id: Uuid,
    blob_auth: Option<BlobAuth>
}

impl BlobDescriptor {
    pub fn new(uri: Url, size: Option<u64>, source_id: Option<Uuid>) -> Self {
        let source_id = match source_id {
            Some(source_id) => source_id,
            None => Uuid::new_v4(),
        };

        Self {
            uri,
            size,
            source_id,
            blob_auth: None,
        }
    }

    pub fn with_blob_auth(mut self, blob_auth: BlobAuth) -> Self {
        self.blob_auth = Some(blob_auth);
        self
    }

    pub fn uri(&self) -> String {
        match &self.blob_auth {
            Some(BlobAuth::SASToken()) => {
                let mut uri = self.uri.clone();
                uri.set_query(Some("sas_token"));
                uri.to_string()
            },
            Some(BlobAuth::UserAssignedManagedIdentity(object_id)) => {
                format!("{};managed_identity={}", self.uri, object_id)
            },
            Some(BlobAuth::SystemAssignedManagedIdentity) => {
                format!("{};managed_identity=system", self.uri)
            },
            None => self.uri.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FileDescriptor {
    pub path: PathBuf,
    pub size: Option<u64>,
    pub source_id: Uuid,
}

impl FileDescriptor {
    /// Describes a local file, deriving its size from the filesystem when not provided.
    pub fn new(path: PathBuf, size: Option<u64>, source_id: Option<Uuid>) -> std::io::Result<Self> {
        let size = match size {
            Some(size) => Some(size),
            None => Some(fs::metadata(&path)?.len()),
        };

        Ok(Self {
            path,
            size,
            source_id: source_id.unwrap_or_else(Uuid::new_v4),
        })
    }
}

pub struct StreamDescriptor {
    stream: Box<dyn Read>,
    size: Option<u64>,
    source_id: Uuid,
    compressed: bool,
    stream_name: String,
}

impl StreamDescriptor {
    pub fn new(
        stream: Box<dyn Read>,
        size: Option<u64>,
        source_id: Option<Uuid>,
        compressed: bool,
        stream_name: String,
    ) -> Self {
        Self {
            stream,
            size,
            source_id: source_id.unwrap_or_else(Uuid::new_v4),
            compressed,
            stream_name,
        }
    }

    /// Opens the file at `file_descriptor`'s path and wraps it as an uncompressed stream.
    pub fn from_file_descriptor(file_descriptor: FileDescriptor) -> std::io::Result<Self> {
        let stream_name = file_descriptor
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = fs::File::open(&file_descriptor.path)?;

        Ok(Self {
            stream: Box::new(file),
            size: file_descriptor.size,
            source_id: file_descriptor.source_id,
            compressed: false,
            stream_name,
        })
    }

    pub fn source_id(&self) -> Uuid {
        self.source_id
    }

    pub fn compressed(&self) -> bool {
        self.compressed
    }

    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    /// Consumes the descriptor, handing back its reader alongside the metadata
    /// needed to build an ingestion message from what's read out of it.
    pub fn into_parts(self) -> (Box<dyn Read>, Option<u64>, Uuid, bool, String) {
        (
            self.stream,
            self.size,
            self.source_id,
            self.compressed,
            self.stream_name,
        )
    }
}
