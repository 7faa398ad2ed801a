include!(concat!(env!("OUT_DIR"), "/pieces.rs"));

/// A piece document with its name
#[derive(Debug, Clone)]
pub struct EmbeddedPiece {
    pub name: String,
    pub content: String,
}

/// Get all embedded pieces
pub fn get_all_pieces() -> Vec<EmbeddedPiece> {
    PIECES
        .iter()
        .map(|(name, content)| EmbeddedPiece {
            name: name.to_string(),
            content: content.to_string(),
        })
        .collect()
}

/// Get a piece by name
pub fn get_piece(name: &str) -> Option<EmbeddedPiece> {
    PIECES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(name, content)| EmbeddedPiece {
            name: name.to_string(),
            content: content.to_string(),
        })
}

/// List all piece names
pub fn list_pieces() -> Vec<&'static str> {
    PIECES.iter().map(|(name, _)| *name).collect()
}
