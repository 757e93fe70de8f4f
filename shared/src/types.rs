use serde::{Deserialize, Serialize};

// ========== PROFILE ==========
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub pfp_url: String, // high-resolution variant, "_normal" stripped
    pub name: String,    // may be empty
    pub handle: String,  // always "@"-prefixed
}

// ========== IMAGE ==========
#[derive(Debug, Clone)]
pub struct ProxyResult {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

// ========== ERRORS ==========
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
