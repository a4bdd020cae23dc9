use pactum_types::{ContentSha, PactContent};

/// Domain-separated BLAKE3 content hasher.
///
/// The hasher carries a domain tag that is prepended to every computation,
/// so a pact document and any other artifact with identical bytes produce
/// different digests.
///
/// Hashing is over the document's raw bytes as published. Reformatting a
/// document (whitespace, key order) changes its digest even though the
/// structural content is unchanged; that distinction is deliberate and is
/// what the history traversal's two-tier duplicate filter relies on.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for pact documents.
    pub const PACT: Self = Self {
        domain: "pactum-pact-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> ContentSha {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        ContentSha::from_hash(*hasher.finalize().as_bytes())
    }

    /// Hash a pact document.
    pub fn hash_content(&self, content: &PactContent) -> ContentSha {
        self.hash(content.as_bytes())
    }

    /// Verify that data produces the expected digest.
    pub fn verify(&self, data: &[u8], expected: &ContentSha) -> bool {
        self.hash(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}
