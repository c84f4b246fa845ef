use std::fs;
use std::io;
use std::hash::Hash;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::analysis::graph::AdjacencyGraph;

// `from,to`, `from<TAB>to` or `from to`, with optional padding around the separator
static EDGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([^\s,]+)\s*(?:,|\s)\s*([^\s,]+)\s*$").unwrap()
});

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("dataset {0} not found")]
    NotFound(String),
    #[error("dataset {0} is not valid UTF-8 text")]
    InvalidEncoding(String),
    #[error("cannot read dataset {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: expected an edge `from,to`, found {content:?}")]
    MalformedInput { line: usize, content: String },
    #[error("line {line}: {token:?} is not a valid node id")]
    InvalidNode { line: usize, token: String },
}

/// Reads an edge-list file, see [`parse_edge_list`].
pub fn read_edge_list<NodeId>(path: impl AsRef<Path>) -> Result<AdjacencyGraph<NodeId>, DatasetError>
where
    NodeId: FromStr + Eq + Hash + Clone,
{
    let path = path.as_ref();
    debug!("Attempting to parse: {}", path.display());

    let content = fs::read_to_string(path).map_err(|err| {
        let path = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => DatasetError::NotFound(path),
            io::ErrorKind::InvalidData => DatasetError::InvalidEncoding(path),
            _ => DatasetError::Io { path, source: err },
        }
    })?;

    parse_edge_list(&content)
}

/// Parses one directed edge per line. Blank lines and lines starting with `#`
/// are skipped; nodes are declared in the order they first appear.
pub fn parse_edge_list<NodeId>(content: &str) -> Result<AdjacencyGraph<NodeId>, DatasetError>
where
    NodeId: FromStr + Eq + Hash + Clone,
{
    let mut graph = AdjacencyGraph::new();

    for (number, text) in content.lines().enumerate() {
        let line = number + 1;
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(captures) = EDGE.captures(trimmed) else {
            return Err(DatasetError::MalformedInput {
                line,
                content: text.to_string(),
            });
        };
        let from = parse_node(&captures[1], line)?;
        let to = parse_node(&captures[2], line)?;
        graph.add_edge(from, to);
    }

    debug!(
        "parsed {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn parse_node<NodeId: FromStr>(token: &str, line: usize) -> Result<NodeId, DatasetError> {
    token.parse().map_err(|_| DatasetError::InvalidNode {
        line,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separators() {
        let graph: AdjacencyGraph<u64> =
            parse_edge_list("1,2\n2\t3\n3 4\n 4 , 1 \n\n# trailing comment\n").unwrap();

        assert_eq!(graph.nodes().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(graph.successors(&4), &[1]);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_parse_string_ids() {
        let graph: AdjacencyGraph<String> = parse_edge_list("a,b\nb,c").unwrap();
        assert_eq!(graph.successors(&"b".to_string()), &["c".to_string()]);
    }

    #[test]
    fn test_malformed_line() {
        let err = parse_edge_list::<u64>("1,2\n1,2,3\n").unwrap_err();
        assert!(matches!(err, DatasetError::MalformedInput { line: 2, .. }));

        let err = parse_edge_list::<u64>("7\n").unwrap_err();
        assert!(matches!(err, DatasetError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_invalid_node() {
        let err = parse_edge_list::<u64>("1,x\n").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidNode { line: 1, ref token } if token == "x"
        ));
        assert_eq!(err.to_string(), "line 1: \"x\" is not a valid node id");
    }

    #[test]
    fn test_missing_file() {
        let err = read_edge_list::<u64>("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, DatasetError::NotFound(_)));
    }

    #[test]
    fn test_invalid_utf8_file() {
        let path = std::env::temp_dir().join("dominator_analyzer_invalid_utf8.txt");
        fs::write(&path, b"1,2\n2,\xff\n").unwrap();
        let result = read_edge_list::<u64>(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(DatasetError::InvalidEncoding(_))));
    }

    #[test]
    fn test_directory_is_not_reported_missing() {
        let err = read_edge_list::<u64>(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().starts_with("cannot read dataset"));
    }

    #[test]
    fn test_read_file() {
        let path = std::env::temp_dir().join("dominator_analyzer_read_file.txt");
        fs::write(&path, "1,2\n1,3\n").unwrap();
        let graph: AdjacencyGraph<u64> = read_edge_list(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(graph.successors(&1), &[2, 3]);
    }
}
