use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{tempdir, TempDir};

fn write_fasta(dir: &TempDir, name: &str, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok(path)
}

#[test]
fn test_scan_end_to_end() -> Result<()> {
    let dir = tempdir()?;
    let genome = write_fasta(&dir, "genome.fa", ">chr1\nABABABA\n")?;
    let patterns = write_fasta(&dir, "patterns.fa", ">p1\nABA\n")?;
    let output = dir.path().join("matches.csv");

    let mut cmd = Command::cargo_bin("seqscout-cli")?;
    cmd.args([
        "scan",
        genome.to_str().unwrap(),
        patterns.to_str().unwrap(),
        output.to_str().unwrap(),
        "-j",
        "2",
        "--log-level",
        "error",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 3 matches for 1 of 1 patterns"))
        .stdout(predicate::str::contains("Results written to"));

    let csv = fs::read_to_string(&output)?;
    assert_eq!(csv, "pattern,start,end\np1,0,3\np1,2,5\np1,4,7\n");
    Ok(())
}

#[test]
fn test_scan_reports_pattern_failures_without_aborting() -> Result<()> {
    let dir = tempdir()?;
    let genome = write_fasta(&dir, "genome.fa", ">chr1\nAAAA\n")?;
    let patterns = write_fasta(&dir, "patterns.fa", ">bad\n>good\nAA\n")?;
    let output = dir.path().join("matches.csv");

    let mut cmd = Command::cargo_bin("seqscout-cli")?;
    cmd.args([
        "scan",
        genome.to_str().unwrap(),
        patterns.to_str().unwrap(),
        output.to_str().unwrap(),
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 3 matches for 1 of 2 patterns"))
        .stdout(predicate::str::contains("1 pattern(s) could not be searched"))
        .stdout(predicate::str::contains("bad"));

    let csv = fs::read_to_string(&output)?;
    assert_eq!(csv, "pattern,start,end\ngood,0,2\ngood,1,3\ngood,2,4\n");
    Ok(())
}

#[test]
fn test_scan_missing_genome_fails() -> Result<()> {
    let dir = tempdir()?;
    let patterns = write_fasta(&dir, "patterns.fa", ">p1\nACG\n")?;
    let output = dir.path().join("matches.csv");

    let mut cmd = Command::cargo_bin("seqscout-cli")?;
    cmd.args([
        "scan",
        dir.path().join("missing-genome.fa").to_str().unwrap(),
        patterns.to_str().unwrap(),
        output.to_str().unwrap(),
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing-genome.fa"));
    Ok(())
}

#[test]
fn test_scan_lowercase_input_matches_case_insensitively() -> Result<()> {
    let dir = tempdir()?;
    let genome = write_fasta(&dir, "genome.fa", ">chr1\ngattaca\n")?;
    let patterns = write_fasta(&dir, "patterns.fa", ">p1\nTAC\n")?;
    let output = dir.path().join("matches.csv");

    let mut cmd = Command::cargo_bin("seqscout-cli")?;
    cmd.args([
        "scan",
        genome.to_str().unwrap(),
        patterns.to_str().unwrap(),
        output.to_str().unwrap(),
    ]);

    cmd.assert().success();

    let csv = fs::read_to_string(&output)?;
    assert_eq!(csv, "pattern,start,end\np1,3,6\n");
    Ok(())
}

#[test]
fn test_scan_reads_config_file() -> Result<()> {
    let dir = tempdir()?;
    let genome = write_fasta(&dir, "genome.fa", ">chr1\nACGTACGT\n")?;
    let patterns = write_fasta(&dir, "patterns.fa", ">p1\nACG\n")?;
    let output = dir.path().join("matches.csv");
    let config = dir.path().join("config.yaml");
    fs::write(&config, "thread_count: 2\nlog_level: \"error\"\n")?;

    let mut cmd = Command::cargo_bin("seqscout-cli")?;
    cmd.args([
        "scan",
        genome.to_str().unwrap(),
        patterns.to_str().unwrap(),
        output.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 2 matches"));
    Ok(())
}

#[test]
fn test_scan_rejects_missing_config_file() -> Result<()> {
    let dir = tempdir()?;
    let genome = write_fasta(&dir, "genome.fa", ">chr1\nACGT\n")?;
    let patterns = write_fasta(&dir, "patterns.fa", ">p1\nAC\n")?;

    let mut cmd = Command::cargo_bin("seqscout-cli")?;
    cmd.args([
        "scan",
        genome.to_str().unwrap(),
        patterns.to_str().unwrap(),
        dir.path().join("out.csv").to_str().unwrap(),
        "--config",
        dir.path().join("nope.yaml").to_str().unwrap(),
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("nope.yaml"));
    Ok(())
}

#[test]
fn test_generate_writes_fasta() -> Result<()> {
    let dir = tempdir()?;
    let output = dir.path().join("random.fa");

    let mut cmd = Command::cargo_bin("seqscout-cli")?;
    cmd.args([
        "generate",
        output.to_str().unwrap(),
        "--count",
        "5",
        "--min-len",
        "4",
        "--max-len",
        "8",
        "--seed",
        "11",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generated"));

    let fasta = fs::read_to_string(&output)?;
    assert_eq!(fasta.matches('>').count(), 5);
    assert!(fasta.starts_with(">seq1\n"));
    Ok(())
}

#[test]
fn test_generate_rejects_invalid_length_range() -> Result<()> {
    let dir = tempdir()?;
    let output = dir.path().join("random.fa");

    let mut cmd = Command::cargo_bin("seqscout-cli")?;
    cmd.args([
        "generate",
        output.to_str().unwrap(),
        "--min-len",
        "9",
        "--max-len",
        "3",
    ]);

    cmd.assert().failure();
    Ok(())
}

#[test]
fn test_generated_fasta_feeds_scan() -> Result<()> {
    let dir = tempdir()?;
    let genome = dir.path().join("genome.fa");
    let patterns = dir.path().join("patterns.fa");
    let output = dir.path().join("matches.csv");

    Command::cargo_bin("seqscout-cli")?
        .args([
            "generate",
            genome.to_str().unwrap(),
            "--count",
            "3",
            "--min-len",
            "50",
            "--max-len",
            "60",
            "--seed",
            "5",
        ])
        .assert()
        .success();

    Command::cargo_bin("seqscout-cli")?
        .args([
            "generate",
            patterns.to_str().unwrap(),
            "--count",
            "10",
            "--min-len",
            "2",
            "--max-len",
            "3",
            "--seed",
            "6",
        ])
        .assert()
        .success();

    Command::cargo_bin("seqscout-cli")?
        .args([
            "scan",
            genome.to_str().unwrap(),
            patterns.to_str().unwrap(),
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let csv = fs::read_to_string(&output)?;
    assert!(csv.starts_with("pattern,start,end\n"));
    // Every reported row must be an intact record
    for line in csv.lines().skip(1) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 3);
        let start: usize = fields[1].parse()?;
        let end: usize = fields[2].parse()?;
        assert!(end > start);
    }
    Ok(())
}
