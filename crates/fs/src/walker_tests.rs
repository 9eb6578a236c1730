use super::*;

use crossbeam::channel;
use std::{
    fs::{self, create_dir, write},
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering as AtomicOrdering},
    },
};

fn find_entry(root: &Path, name: &str) -> fs::DirEntry {
    fs::read_dir(root)
        .expect("read_dir")
        .find(|res| {
            res.as_ref()
                .ok()
                .map(|e| e.file_name() == name)
                .unwrap_or(false)
        })
        .expect("entry present")
        .expect("entry ok")
}

fn collect(
    roots: Vec<ScanRoot>,
    ctx: ScanContext,
) -> (Vec<FileRecord>, std::result::Result<(), ScanError>) {
    let (file_tx, file_rx) = channel::unbounded::<Vec<FileRecord>>();

    let result = walk_parallel(roots, file_tx.clone(), Arc::new(ctx), 4);
    drop(file_tx);

    let mut records = Vec::new();
    while let Ok(batch) = file_rx.recv() {
        records.extend(batch);
    }
    (records, result)
}

fn rel_paths(records: &[FileRecord], root: &Path) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = records
        .iter()
        .map(|r| r.full_path.strip_prefix(root).unwrap().to_path_buf())
        .collect();
    out.sort();
    out
}

#[test]
fn inspect_fs_entry_returns_record_for_regular_file() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    let file_path = root.join("Customer.CLS");
    write(&file_path, b"class Customer: end class.").expect("write file");

    let scan_root = Arc::new(ScanRoot::recursive(root));
    let entry = find_entry(root, "Customer.CLS");
    let rec = inspect_fs_entry(&entry, &scan_root, &ScanContext::default())
        .expect("inspect ok")
        .expect("some record");

    assert_eq!(rec.full_path, file_path);
    assert_eq!(rec.name, "Customer.CLS");
    assert_eq!(rec.ext.as_deref(), Some("cls"));
    assert_eq!(*rec.root, ScanRoot::recursive(root));
    assert!(!rec.is_dir);
    assert!(!rec.is_symlink);
    assert!(!rec.read_only);
    assert!(!rec.hidden_os);
    assert!(!rec.ignored_glob);
}

#[test]
fn inspect_fs_entry_marks_directories_without_extension() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    create_dir(root.join("src.v2")).expect("create subdir");

    let scan_root = Arc::new(ScanRoot::flat(root));
    let entry = find_entry(root, "src.v2");
    let rec = inspect_fs_entry(&entry, &scan_root, &ScanContext::default())
        .expect("inspect ok")
        .expect("some record");

    assert!(rec.is_dir);
    assert_eq!(rec.ext, None);
}

#[test]
fn inspect_fs_entry_flags_hidden_and_read_only_files() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join(".propath"), b"x").expect("write hidden");
    let locked = root.join("locked.i");
    write(&locked, b"x").expect("write locked");
    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&locked, perms).unwrap();

    let scan_root = Arc::new(ScanRoot::flat(root));
    let ctx = ScanContext::default();

    let hidden = inspect_fs_entry(&find_entry(root, ".propath"), &scan_root, &ctx)
        .unwrap()
        .unwrap();
    assert!(hidden.hidden_os);

    let ro = inspect_fs_entry(&find_entry(root, "locked.i"), &scan_root, &ctx)
        .unwrap()
        .unwrap();
    assert!(ro.read_only);
}

#[test]
fn scan_dir_enqueues_subdirs_of_recursive_roots_only() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    // root/
    //   a.p
    //   sub/
    //     b.i
    write(root.join("a.p"), b"a").unwrap();
    create_dir(root.join("sub")).unwrap();
    write(root.join("sub").join("b.i"), b"b").unwrap();

    let cases = [
        (ScanRoot::recursive(root), true),
        (ScanRoot::flat(root), false),
    ];

    for (scan_root, expect_queued) in cases {
        let (work_tx, work_rx) = channel::unbounded::<WorkItem>();
        let mut batch = Vec::new();
        let pending = AtomicUsize::new(0);
        let item = WorkItem {
            dir: root.to_path_buf(),
            root: Arc::new(scan_root),
            is_root: true,
        };

        scan_dir(&item, &work_tx, &mut batch, &ScanContext::default(), &pending)
            .expect("scan_dir");

        let mut names: Vec<_> = batch.iter().map(|r| r.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["a.p", "sub"]);

        match work_rx.try_recv() {
            Ok(queued) => {
                assert!(expect_queued);
                assert_eq!(queued.dir, root.join("sub"));
                assert!(!queued.is_root);
                assert_eq!(pending.load(AtomicOrdering::Relaxed), 1);
            }
            Err(_) => {
                assert!(!expect_queued);
                assert_eq!(pending.load(AtomicOrdering::Relaxed), 0);
            }
        }
    }
}

#[test]
fn walk_parallel_scans_tree_and_skips_ignored_and_hidden_dirs() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path().to_path_buf();

    // root/
    //   a.p
    //   sub/b.i
    //   .git/HEAD
    //   .settings/prefs
    write(root.join("a.p"), b"a").unwrap();
    create_dir(root.join("sub")).unwrap();
    write(root.join("sub").join("b.i"), b"b").unwrap();
    create_dir(root.join(".git")).unwrap();
    write(root.join(".git").join("HEAD"), b"ref").unwrap();
    create_dir(root.join(".settings")).unwrap();
    write(root.join(".settings").join("prefs"), b"p").unwrap();

    let ctx = ScanContext {
        ignore: IgnoreEngine::with_defaults(&root).unwrap(),
        descend_hidden: false,
    };
    let (records, result) = collect(vec![ScanRoot::recursive(&root)], ctx);
    result.expect("walk ok");

    assert_eq!(
        rel_paths(&records, &root),
        vec![
            PathBuf::from(".git"),
            PathBuf::from(".settings"),
            PathBuf::from("a.p"),
            PathBuf::from("sub"),
            PathBuf::from("sub/b.i"),
        ]
    );
    let git = records.iter().find(|r| r.name == ".git").unwrap();
    assert!(git.ignored_glob);
}

#[test]
fn walk_parallel_descends_hidden_dirs_when_asked() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path().to_path_buf();
    create_dir(root.join(".settings")).unwrap();
    write(root.join(".settings").join("prefs"), b"p").unwrap();

    let ctx = ScanContext {
        ignore: IgnoreEngine::default(),
        descend_hidden: true,
    };
    let (records, result) = collect(vec![ScanRoot::recursive(&root)], ctx);
    result.expect("walk ok");

    assert_eq!(
        rel_paths(&records, &root),
        vec![PathBuf::from(".settings"), PathBuf::from(".settings/prefs")]
    );
}

#[test]
fn walk_parallel_aggregates_root_failures_but_keeps_other_roots() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let good = tmp.path().join("good");
    create_dir(&good).unwrap();
    write(good.join("x.w"), b"x").unwrap();
    let missing_a = tmp.path().join("missing-a");
    let missing_b = tmp.path().join("missing-b");

    let (records, result) = collect(
        vec![
            ScanRoot::flat(&missing_a),
            ScanRoot::flat(&good),
            ScanRoot::flat(&missing_b),
        ],
        ScanContext::default(),
    );

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "x.w");

    let err = result.expect_err("two roots are missing");
    let mut failed: Vec<PathBuf> = err.failures().iter().map(|f| f.path.clone()).collect();
    failed.sort();
    assert_eq!(failed, vec![missing_a, missing_b]);
    assert!(err.to_string().starts_with("failed to list 2 of 3 root(s)"));
}

#[test]
fn walk_parallel_with_no_roots_emits_nothing() {
    let (records, result) = collect(Vec::new(), ScanContext::default());
    result.expect("walk ok");
    assert!(records.is_empty());
}
