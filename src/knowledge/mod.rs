use log::{info, warn};
use serde::Serialize;
use tokio::sync::RwLock;

/// Compiled-in fallback so the service answers sensibly even when the data
/// file is missing from the deployment.
pub const DEFAULT_KNOWLEDGE_BASE: &str = include_str!("../../data/knowledge_base.md");

/// The opaque system-instruction text handed to answer generation. No
/// structure is imposed on it; the admin API replaces it wholesale and the
/// session controller reads the latest value at call time.
pub struct KnowledgeBase {
    content: RwLock<String>,
}

impl KnowledgeBase {
    pub fn load(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(text) => {
                info!("Loaded knowledge base from '{}' ({} bytes)", path, text.len());
                text
            }
            Err(e) => {
                warn!(
                    "Could not read knowledge base file '{}': {}. Using built-in default.",
                    path, e
                );
                DEFAULT_KNOWLEDGE_BASE.to_string()
            }
        };
        Self {
            content: RwLock::new(content),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: RwLock::new(text.into()),
        }
    }

    pub async fn read(&self) -> String {
        self.content.read().await.clone()
    }

    /// Replaces the whole text, returning the new length in bytes.
    pub async fn replace(&self, new_content: String) -> usize {
        let len = new_content.len();
        let mut guard = self.content.write().await;
        *guard = new_content;
        info!("Knowledge base replaced ({} bytes)", len);
        len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocCategory {
    Constitution,
    Act,
    Crime,
}

/// Catalogue entry for a source law. Display data only — the answer pipeline
/// never consults it.
#[derive(Debug, Clone, Serialize)]
pub struct LegalDocument {
    pub id: &'static str,
    pub title: &'static str,
    pub short_title: &'static str,
    pub description: &'static str,
    pub category: DocCategory,
}

pub const AVAILABLE_DOCUMENTS: &[LegalDocument] = &[
    LegalDocument {
        id: "const-1991",
        title: "The Constitution of Sierra Leone, 1991",
        short_title: "1991 Constitution",
        description: "The supreme law of the land outlining fundamental rights and government structure.",
        category: DocCategory::Constitution,
    },
    LegalDocument {
        id: "citizen-act",
        title: "The Sierra Leone Citizenship Act",
        short_title: "Citizenship Act",
        description: "Laws governing birthright, naturalization, and dual citizenship.",
        category: DocCategory::Act,
    },
    LegalDocument {
        id: "public-order",
        title: "The Public Order Act, 1965",
        short_title: "Public Order Act",
        description: "Regulations concerning public gatherings, processions, and peace.",
        category: DocCategory::Act,
    },
    LegalDocument {
        id: "cyber-2021",
        title: "The Cyber Security and Crime Act, 2021",
        short_title: "Cyber Security Act",
        description: "Modern laws protecting citizens online, covering bullying, fraud, and data.",
        category: DocCategory::Crime,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replace_swaps_the_whole_text() {
        let kb = KnowledgeBase::from_text("old text");
        assert_eq!(kb.read().await, "old text");

        let len = kb.replace("new text".to_string()).await;
        assert_eq!(len, "new text".len());
        assert_eq!(kb.read().await, "new text");
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let kb = KnowledgeBase::load("no/such/file.md");
        let text = kb.content.try_read().unwrap();
        assert_eq!(&*text, DEFAULT_KNOWLEDGE_BASE);
    }

    #[test]
    fn default_knowledge_base_covers_the_four_documents() {
        assert!(DEFAULT_KNOWLEDGE_BASE.contains("SaloneCivic AI"));
        assert_eq!(AVAILABLE_DOCUMENTS.len(), 4);
        for doc in AVAILABLE_DOCUMENTS {
            assert!(!doc.title.is_empty());
        }
    }
}
