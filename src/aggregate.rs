use std::collections::HashMap;

use crate::runner::SampleRecord;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct DataPoint {
    pub x: u64,
    pub y: u64,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Bucket {
    pub key: u64,
    pub points: Vec<DataPoint>,
}

/// Groups sample records into buckets keyed by `key_selector`, collecting the
/// point `(x_selector(record), elapsed nanoseconds)` per record. Bucket order
/// is the first-seen order of keys; point order within a bucket is record
/// order. Repeated x values are kept as distinct points.
///
/// The selectors keep the grouping axis pluggable: the same record stream
/// supports "group by file size, plot against buffer capacity" as well as the
/// transposed view without duplicating the walk.
pub fn aggregate<K, X>(records: &[SampleRecord], key_selector: K, x_selector: X) -> Vec<Bucket>
where
    K: Fn(&SampleRecord) -> u64,
    X: Fn(&SampleRecord) -> u64,
{
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();

    for record in records {
        let key = key_selector(record);
        let point = DataPoint {
            x: x_selector(record),
            y: record.elapsed.as_nanos() as u64,
        };

        match index.get(&key) {
            Some(&at) => buckets[at].points.push(point),
            None => {
                index.insert(key, buckets.len());
                buckets.push(Bucket {
                    key,
                    points: vec![point],
                });
            }
        }
    }

    buckets
}
