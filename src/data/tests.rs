// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};

use super::{parse_parties, DataSource, LoadError};
use crate::model::{Party, PartyId, Representative};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("advomail-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

struct DataDirCtx {
    tmp: TempDir,
    source: DataSource,
}

impl DataDirCtx {
    fn new(prefix: &str) -> Self {
        let tmp = TempDir::new(prefix);
        let source = DataSource::new(
            tmp.path().join("politicians.json"),
            tmp.path().join("parties.json"),
            fallback_parties(),
        );
        Self { tmp, source }
    }

    fn write(&self, name: &str, contents: &str) {
        std::fs::write(self.tmp.path().join(name), contents).unwrap();
    }
}

fn fallback_parties() -> Vec<Party> {
    vec![Party::new(PartyId::new("placeholder").unwrap(), "Placeholder Party")]
}

const POLITICIANS: &str = r#"{
    "vic": [{"id": "v1", "name": "Zoe Adams"}, {"id": "v2", "name": "Ann Brown"}],
    "new-south-wales": [{"name": "Jane Smith"}]
}"#;

const PARTIES: &str = r#"[
    {"id": "partyA", "label": "Party A"},
    {"id": "partyB", "label": "Party B"}
]"#;

#[fixture]
fn ctx() -> DataDirCtx {
    DataDirCtx::new("data")
}

#[rstest]
fn loads_both_resources(ctx: DataDirCtx) {
    ctx.write("politicians.json", POLITICIANS);
    ctx.write("parties.json", PARTIES);

    let directory = ctx.source.load_blocking().unwrap();

    let party_ids = directory.parties().iter().map(|p| p.id().as_str()).collect::<Vec<_>>();
    assert_eq!(party_ids, ["partyA", "partyB"]);
    let codes = directory.region_codes().map(|c| c.as_str()).collect::<Vec<_>>();
    assert_eq!(codes, ["new-south-wales", "vic"]);
    assert_eq!(
        directory.representatives_in("vic"),
        [Representative::new("Zoe Adams"), Representative::new("Ann Brown")]
    );
}

#[rstest]
fn missing_parties_file_uses_fallback(ctx: DataDirCtx) {
    ctx.write("politicians.json", POLITICIANS);

    let directory = ctx.source.load_blocking().unwrap();

    assert_eq!(directory.parties(), fallback_parties().as_slice());
    assert_eq!(directory.region_codes().count(), 2);
}

#[rstest]
#[case::malformed_json("[{\"id\": \"partyA\"")]
#[case::wrong_shape("{\"partyA\": \"Party A\"}")]
fn unusable_parties_file_uses_fallback(ctx: DataDirCtx, #[case] parties: &str) {
    ctx.write("politicians.json", POLITICIANS);
    ctx.write("parties.json", parties);

    let directory = ctx.source.load_blocking().unwrap();

    assert_eq!(directory.parties(), fallback_parties().as_slice());
}

#[rstest]
fn missing_representatives_file_is_fatal(ctx: DataDirCtx) {
    ctx.write("parties.json", PARTIES);

    let err = ctx.source.load_blocking().unwrap_err();
    let err = err.downcast_ref::<LoadError>().expect("load error");
    assert!(matches!(err, LoadError::Io { .. }), "unexpected error: {err}");
}

#[rstest]
fn malformed_representatives_file_is_fatal(ctx: DataDirCtx) {
    ctx.write("politicians.json", "[\"not\", \"a\", \"map\"]");
    ctx.write("parties.json", PARTIES);

    let err = ctx.source.load_blocking().unwrap_err();
    let err = err.downcast_ref::<LoadError>().expect("load error");
    assert!(matches!(err, LoadError::Json { .. }), "unexpected error: {err}");
    assert!(err.to_string().contains("politicians.json"));
}

#[rstest]
fn unusable_region_codes_are_skipped(ctx: DataDirCtx) {
    ctx.write(
        "politicians.json",
        r#"{"": [{"name": "Nobody"}], "act ": [{"name": "Ann Lee"}], "vic": [{"name": "Zoe Adams"}]}"#,
    );

    let directory = ctx.source.load_blocking().unwrap();

    let codes = directory.region_codes().map(|c| c.as_str()).collect::<Vec<_>>();
    assert_eq!(codes, ["vic"]);
}

#[rstest]
fn unusable_party_ids_are_skipped_individually(ctx: DataDirCtx) {
    ctx.write("politicians.json", POLITICIANS);
    ctx.write(
        "parties.json",
        r#"[{"id": "labour", "label": "Labour"}, {"id": "greens ", "label": "Greens"}, {"id": "", "label": "Nobody"}]"#,
    );

    let directory = ctx.source.load_blocking().unwrap();

    let labels = directory.parties().iter().map(Party::label).collect::<Vec<_>>();
    assert_eq!(labels, ["Labour"]);
}

#[tokio::test]
async fn async_load_reads_concurrently() {
    let ctx = DataDirCtx::new("data-async");
    ctx.write("politicians.json", POLITICIANS);
    ctx.write("parties.json", PARTIES);

    let directory = ctx.source.load().await.unwrap();
    assert_eq!(directory.parties().len(), 2);
}

#[test]
fn parse_parties_keeps_file_order() {
    let parties = parse_parties(Path::new("parties.json"), PARTIES.as_bytes()).unwrap();
    let labels = parties.iter().map(Party::label).collect::<Vec<_>>();
    assert_eq!(labels, ["Party A", "Party B"]);
}
