use keygraph::*;
use keygraph::embed::StoredEmbeddings;
use keygraph::pipeline::{self, Outcome};
use std::fs;

const EPS : f64 = 10E-9;

fn read_table(content : &str) -> Vec<(String, f64, f64)> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    assert_eq!(rdr.headers().unwrap().iter().collect::<Vec<_>>(), vec!["title", "x", "y"]);
    rdr.records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].to_string(), r[1].parse().unwrap(), r[2].parse().unwrap())
        })
        .collect()
}

/// Same coordinates up to a global sign flip of each axis.
fn same_up_to_sign(a : &[f64], b : &[f64]) -> bool {
    let direct = a.iter().zip(b.iter()).all(|(u, v)| (u - v).abs() < EPS );
    let flipped = a.iter().zip(b.iter()).all(|(u, v)| (u + v).abs() < EPS );
    direct || flipped
}

fn spread_samples() -> Vec<Sample> {
    // Uncorrelated columns with distinct spreads: the principal axes are the first and third.
    let xs = [3.0, -3.0, 1.0, -1.0, 0.0, 0.0];
    let ys = [0.5, 0.5, -0.5, -0.5, 0.3, -0.3];
    xs.iter().zip(ys.iter()).enumerate()
        .map(|(i, (x, y))| Sample::new(format!("w{}", i), vec![*x, 7.0, *y, -1.0, 0.0]) )
        .collect()
}

#[test]
fn line_count_and_order() {
    let samples = spread_samples();
    let labels : Vec<String> = samples.iter().map(|s| s.label.clone() ).collect();
    let stored = StoredEmbeddings::new(samples);
    let mut buf : Vec<u8> = Vec::new();
    let out = pipeline::run(&labels[..], &stored, &mut buf).unwrap();
    assert_eq!(out, Outcome::Written(6));
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.lines().count(), 7);
    let rows = read_table(&text);
    for (row, label) in rows.iter().zip(labels.iter()) {
        assert_eq!(&row.0, label);
    }
}

#[test]
fn recovers_axes_up_to_sign() {
    let samples = spread_samples();
    let tbl = SampleTable::new(samples.clone()).unwrap();
    let rows = pipeline::reduce(&tbl).unwrap();
    let n = samples.len() as f64;
    let mx = samples.iter().map(|s| s.vector[0] ).sum::<f64>() / n;
    let my = samples.iter().map(|s| s.vector[2] ).sum::<f64>() / n;
    let exp_x : Vec<f64> = samples.iter().map(|s| s.vector[0] - mx ).collect();
    let exp_y : Vec<f64> = samples.iter().map(|s| s.vector[2] - my ).collect();
    let got_x : Vec<f64> = rows.iter().map(|r| r.x ).collect();
    let got_y : Vec<f64> = rows.iter().map(|r| r.y ).collect();
    assert!(same_up_to_sign(&got_x, &exp_x));
    assert!(same_up_to_sign(&got_y, &exp_y));

    // A second run agrees with the first, again up to sign per axis.
    let again = pipeline::reduce(&tbl).unwrap();
    let again_x : Vec<f64> = again.iter().map(|r| r.x ).collect();
    let again_y : Vec<f64> = again.iter().map(|r| r.y ).collect();
    assert!(same_up_to_sign(&got_x, &again_x));
    assert!(same_up_to_sign(&got_y, &again_y));
}

#[test]
fn identical_vectors_collapse_to_origin() {
    let v : Vec<f64> = (0..16).map(|i| (i as f64).sin() ).collect();
    let tbl = SampleTable::new(
        ["blue", "carrot", "space"].iter().map(|l| Sample::new(*l, v.clone()) ).collect()
    ).unwrap();
    let rows = pipeline::reduce(&tbl).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.x.abs() < EPS && r.y.abs() < EPS ));
}

#[test]
fn single_sample_is_origin() {
    let stored = StoredEmbeddings::new(vec![Sample::new("train", vec![0.3; 8])]);
    let mut buf : Vec<u8> = Vec::new();
    assert_eq!(pipeline::run(&["train"], &stored, &mut buf).unwrap(), Outcome::Written(1));
    let rows = read_table(&String::from_utf8(buf).unwrap());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, "train");
    assert!(rows[0].1.abs() < EPS && rows[0].2.abs() < EPS);
}

#[test]
fn file_round_trip_with_awkward_labels() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("vectors.json");
    let out = dir.path().join("embeddings.csv");
    let awkward = "lion, \"king\"\nof beasts";
    StoredEmbeddings::new(vec![
        Sample::new(awkward, vec![1.0, 0.0, 0.0]),
        Sample::new("tiger", vec![0.0, 1.0, 0.0]),
        Sample::new("helicopter", vec![0.0, 0.0, 5.0])
    ]).save(&src).unwrap();

    let stored = StoredEmbeddings::open(&src).unwrap();
    let labels = stored.labels();
    let outcome = pipeline::run(&labels[..], &stored, &mut FileSink::new(&out)).unwrap();
    assert_eq!(outcome, Outcome::Written(3));

    let rows = read_table(&fs::read_to_string(&out).unwrap());
    let got : Vec<&str> = rows.iter().map(|r| &r.0[..] ).collect();
    assert_eq!(got, vec![awkward, "tiger", "helicopter"]);
    // The outlier dominates the first direction.
    assert!(rows[2].1.abs() > rows[0].1.abs());
}

#[test]
fn empty_run_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("embeddings.csv");
    let stored = StoredEmbeddings::default();
    let labels = stored.labels();
    let outcome = pipeline::run(&labels[..], &stored, &mut FileSink::new(&out)).unwrap();
    assert_eq!(outcome, Outcome::Empty);
    assert!(!out.exists());
}

#[test]
fn mismatch_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("embeddings.csv");
    let stored = StoredEmbeddings::new(vec![
        Sample::new("cat", vec![0.0; 512]),
        Sample::new("mouse", vec![0.0; 256])
    ]);
    let err = pipeline::run(&["cat", "mouse"], &stored, &mut FileSink::new(&out)).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected : 512, actual : 256, .. }));
    assert!(!out.exists());
}

#[test]
fn provider_failure_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("embeddings.csv");
    let stored = StoredEmbeddings::new(vec![Sample::new("cat", vec![1.0, 2.0])]);
    let err = pipeline::run(&["cat", "dog"], &stored, &mut FileSink::new(&out)).unwrap_err();
    assert!(matches!(err, Error::Provider { .. }));
    assert!(!out.exists());
}

#[test]
fn repeated_labels_project_their_own_vectors() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("vectors.json");
    let out = dir.path().join("embeddings.csv");
    StoredEmbeddings::new(vec![
        Sample::new("cat", vec![1.0, 0.0, 0.0]),
        Sample::new("cat", vec![-1.0, 0.0, 0.0]),
        Sample::new("dog", vec![0.0, 0.5, 0.0])
    ]).save(&src).unwrap();

    let tbl = StoredEmbeddings::open(&src).unwrap().into_table().unwrap();
    let outcome = pipeline::run_table(&tbl, &mut FileSink::new(&out)).unwrap();
    assert_eq!(outcome, Outcome::Written(3));

    let rows = read_table(&fs::read_to_string(&out).unwrap());
    let got : Vec<&str> = rows.iter().map(|r| &r.0[..] ).collect();
    assert_eq!(got, vec!["cat", "cat", "dog"]);
    // The two cats sit on opposite sides of the origin along the first axis.
    assert!((rows[0].1 + rows[1].1).abs() < EPS);
    assert!(rows[0].1.abs() > EPS);
}
