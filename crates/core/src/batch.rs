//! Chunking plan for BatchWriteItem.

use crate::record::Record;

/// Maximum number of put/delete requests DynamoDB accepts in one BatchWriteItem call.
pub const BATCH_WRITE_LIMIT: usize = 25;

/// Number of BatchWriteItem requests needed for `len` records.
pub fn chunk_count(len: usize) -> usize {
    len.div_ceil(BATCH_WRITE_LIMIT)
}

/// Splits records into consecutive chunks of at most [`BATCH_WRITE_LIMIT`], in order.
pub fn batches(records: &[Record]) -> impl Iterator<Item = &[Record]> {
    records.chunks(BATCH_WRITE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::number_value;

    fn records(len: usize) -> Vec<Record> {
        (0..len)
            .map(|i| Record::from([("id".to_string(), number_value(i))]))
            .collect()
    }

    #[test]
    fn test_chunk_count() {
        assert_eq!(chunk_count(0), 0);
        assert_eq!(chunk_count(1), 1);
        assert_eq!(chunk_count(25), 1);
        assert_eq!(chunk_count(26), 2);
        assert_eq!(chunk_count(50), 2);
        assert_eq!(chunk_count(51), 3);
    }

    #[test]
    fn test_batches_sizes() {
        let items = records(60);
        let sizes: Vec<usize> = batches(&items).map(<[Record]>::len).collect();
        assert_eq!(sizes, vec![25, 25, 10]);
    }

    #[test]
    fn test_batches_exact_multiple() {
        let items = records(50);
        let sizes: Vec<usize> = batches(&items).map(<[Record]>::len).collect();
        assert_eq!(sizes, vec![25, 25]);
    }

    #[test]
    fn test_batches_preserve_order() {
        let items = records(30);
        let flattened: Vec<&Record> = batches(&items).flatten().collect();
        assert_eq!(flattened.len(), 30);
        assert_eq!(flattened[0].get("id"), Some(&number_value(0)));
        assert_eq!(flattened[29].get("id"), Some(&number_value(29)));
    }

    #[test]
    fn test_batches_empty() {
        assert_eq!(batches(&[]).count(), 0);
    }
}
