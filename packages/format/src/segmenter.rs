/// Split lines into blank-line separated blocks.
///
/// Runs of blank lines never produce an empty block, and a trailing block
/// without a closing blank line is still emitted. Only empty lines separate
/// blocks; a line of spaces is block content.
pub fn segment_blocks(lines: &[String]) -> Vec<Vec<String>> {
    let mut blocks = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in lines {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.clone());
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Render blocks so that [`segment_blocks`] reads them back.
///
/// Each block is followed by a single blank line.
pub fn join_blocks<I>(blocks: I) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut lines = Vec::new();
    for block in blocks {
        lines.extend(block);
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_blocks() {
        let blocks = segment_blocks(&lines(&["foo", "", "bar", "baz", ""]));
        assert_eq!(blocks, vec![lines(&["foo"]), lines(&["bar", "baz"])]);
    }

    #[test]
    fn test_blank_runs_do_not_make_empty_blocks() {
        let blocks = segment_blocks(&lines(&["", "", "foo", "", "", "", "bar", ""]));
        assert_eq!(blocks, vec![lines(&["foo"]), lines(&["bar"])]);
    }

    #[test]
    fn test_whitespace_line_stays_in_block() {
        let blocks = segment_blocks(&lines(&["a", "  ", "b"]));
        assert_eq!(blocks, vec![lines(&["a", "  ", "b"])]);

        let blocks = segment_blocks(&lines(&["a", "  ", "", "b"]));
        assert_eq!(blocks, vec![lines(&["a", "  "]), lines(&["b"])]);
    }

    #[test]
    fn test_trailing_block_without_blank() {
        let blocks = segment_blocks(&lines(&["foo", "", "bar"]));
        assert_eq!(blocks, vec![lines(&["foo"]), lines(&["bar"])]);
    }

    #[test]
    fn test_empty_input() {
        assert!(segment_blocks(&[]).is_empty());
        assert!(segment_blocks(&lines(&["", ""])).is_empty());
    }

    #[test]
    fn test_join_then_segment_preserves_order() {
        let blocks = vec![lines(&["a", "1"]), lines(&["b"]), lines(&["c", "2", "3"])];
        assert_eq!(segment_blocks(&join_blocks(blocks.clone())), blocks);
    }
}
