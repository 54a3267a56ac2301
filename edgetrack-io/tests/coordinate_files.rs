use approx::assert_relative_eq;
use edgetrack_core::{InterpolationFactor, RawRecord, TrackCollection};
use edgetrack_io::{read_raw_records, read_tracks, write_tracks, Error};
use std::fs;

#[test]
fn test_read_tracks_from_detector_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output_intermediate.txt");
    fs::write(&path, "5 5\n6 6\n7 7\n-1 -1\n1 1\n-1 -1\n").unwrap();

    let tracks = read_tracks(&path, 2).unwrap();

    assert_eq!(tracks.len(), 1);
    let track = tracks.get(0).unwrap();
    assert_eq!(track.x, vec![5.0, 6.0, 7.0]);
    assert_eq!(track.y, vec![5.0, 6.0, 7.0]);
}

#[test]
fn test_empty_detector_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output_intermediate.txt");
    fs::write(&path, "").unwrap();

    assert!(read_tracks(&path, 0).unwrap().is_empty());
}

#[test]
fn test_malformed_file_fails_before_filtering() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output_intermediate.txt");
    // The bad row sits inside a run that would be filtered out anyway.
    fs::write(&path, "1 1\n-1 -1\n2 2 2\n-1 -1\n").unwrap();

    let err = read_tracks(&path, 100).unwrap_err();
    assert!(matches!(err, Error::Parse { line: 3, .. }));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_tracks(dir.path().join("absent.txt"), 0).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_interpolated_output_is_rescaled() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracks = TrackCollection::new();
    tracks.push_points([(4.0, 4.0), (6.0, 6.0)]);
    let factor = InterpolationFactor::new(2).unwrap();

    let path = write_tracks(dir.path(), &tracks, factor).unwrap();
    assert_eq!(path.file_name().unwrap(), "output_inter.txt");

    let records = read_raw_records(&path).unwrap();
    assert_eq!(records.len(), 3);
    assert_relative_eq!(records[0].x, 2.0);
    assert_relative_eq!(records[1].x, 3.0);
    assert_relative_eq!(records[0].y, 2.0);
    assert_relative_eq!(records[1].y, 3.0);
}

#[test]
fn test_plain_output_name_and_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracks = TrackCollection::new();
    tracks.push_points([(0.125, 10.75), (1.5, 11.0), (2.875, 11.25)]);
    tracks.push_points([(40.0, 2.0), (41.0, 3.0)]);

    let path = write_tracks(dir.path(), &tracks, InterpolationFactor::ONE).unwrap();
    assert_eq!(path.file_name().unwrap(), "output.txt");

    let records = read_raw_records(&path).unwrap();
    assert_eq!(records, tracks.to_records(InterpolationFactor::ONE));
    assert_eq!(records[3], RawRecord::TERMINATOR);
    assert_eq!(read_tracks(&path, 0).unwrap(), tracks);
}

#[test]
fn test_zero_tracks_writes_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_tracks(dir.path(), &TrackCollection::new(), InterpolationFactor::ONE).unwrap();
    assert!(fs::read_to_string(path).unwrap().is_empty());
}
