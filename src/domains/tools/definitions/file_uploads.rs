//! File upload endpoints.

use super::super::descriptor::{EndpointDescriptor, FieldSpec, HttpMethod};

pub const RETRIEVE_A_FILE_UPLOAD: EndpointDescriptor = EndpointDescriptor {
    name: "retrieve-a-file-upload",
    description: "Retrieve a file upload",
    method: HttpMethod::Get,
    path: "/v1/file_uploads/{fileUploadId}",
    fields: &[FieldSpec::path("fileUploadId", "file_upload_id")],
};
