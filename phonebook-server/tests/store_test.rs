use phonebook_server::store::{read_collection, write_collection};
use std::fs;
use std::thread;
use tempfile::TempDir;

const RECORDS: u64 = 2_000;

#[test]
fn concurrent_writers_replace_whole_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.json");

    thread::scope(|scope| {
        for writer in 0..8u64 {
            let path = &path;
            scope.spawn(move || {
                let records: Vec<u64> = (0..RECORDS).map(|n| writer * 10_000 + n).collect();
                for _ in 0..10 {
                    write_collection(path, &records).unwrap();
                    let read: Vec<u64> = read_collection(path).unwrap();
                    assert_eq!(read.len() as u64, RECORDS);
                }
            });
        }
    });

    // Last writer wins, with no mix of two writers' records
    let last: Vec<u64> = read_collection(&path).unwrap();
    let writer = last[0] / 10_000;
    assert!(last.iter().all(|record| record / 10_000 == writer));

    // Temporary files are renamed into place, none are left over
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn write_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("groups.json");

    write_collection(&path, &[1u64, 2, 3]).unwrap();
    assert_eq!(read_collection::<u64>(&path).unwrap(), vec![1, 2, 3]);
}
