use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

use relpath::canonical;
use relpath::{Containment, RelativeFileNameTransformer, RelativizeError};
use tempfile::TempDir;

fn native(s: &str) -> String {
    s.replace('/', MAIN_SEPARATOR_STR)
}

/// `proj/` with `src/Main.cpp` and `build/vs/`, plus a sibling `proj-other/`.
fn project() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("proj");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("build").join("vs")).unwrap();
    fs::write(root.join("src").join("Main.cpp"), "").unwrap();
    fs::create_dir_all(dir.path().join("proj-other")).unwrap();
    fs::write(dir.path().join("proj-other").join("file.txt"), "").unwrap();
    (dir, root)
}

// ── Reference equals root ──

#[test]
fn target_below_root_from_root() {
    let (_dir, root) = project();
    let t = RelativeFileNameTransformer::for_directory(&root, &root);
    assert_eq!(t.transform(&root.join("src").join("Main.cpp")), native("src/Main.cpp"));
}

#[test]
fn root_itself_is_dot() {
    let (_dir, root) = project();
    let t = RelativeFileNameTransformer::for_directory(&root, &root);
    assert_eq!(t.transform(&root), ".");
}

#[test]
fn dot_segments_in_target_are_resolved() {
    let (_dir, root) = project();
    let t = RelativeFileNameTransformer::for_directory(&root, &root);
    let target = root.join("build").join("..").join(".").join("src").join("Main.cpp");
    assert_eq!(t.transform(&target), native("src/Main.cpp"));
}

#[test]
fn missing_target_is_still_relativized() {
    let (_dir, root) = project();
    let t = RelativeFileNameTransformer::for_directory(&root, &root);
    let target = root.join("gen").join("Generated.cpp");
    assert_eq!(t.transform(&target), native("gen/Generated.cpp"));
}

// ── Reference below root ──

#[test]
fn ascends_once_per_level() {
    let (_dir, root) = project();
    let target = root.join("src").join("Main.cpp");

    let two_deep = RelativeFileNameTransformer::for_directory(&root, root.join("build").join("vs"));
    assert_eq!(two_deep.transform(&target), native("../../src/Main.cpp"));

    let three_deep =
        RelativeFileNameTransformer::for_directory(&root, root.join("build").join("vs").join("x64"));
    assert_eq!(three_deep.transform(&target), native("../../../src/Main.cpp"));
}

#[test]
fn ascent_alone_when_target_is_root() {
    let (_dir, root) = project();
    let t = RelativeFileNameTransformer::for_directory(&root, root.join("build").join("vs"));
    assert_eq!(t.transform(&root), native("../.."));
}

#[test]
fn reference_itself_goes_up_and_back_down() {
    let (_dir, root) = project();
    let build = root.join("build");
    let t = RelativeFileNameTransformer::for_directory(&root, &build);
    assert_eq!(t.transform(&build), native("../build"));
}

// ── for_file ──

#[test]
fn for_file_directly_under_root() {
    let (_dir, root) = project();
    let t = RelativeFileNameTransformer::for_file(&root, root.join("App.sln"));
    assert_eq!(t.transform(&root), ".");
    assert_eq!(t.transform(&root.join("src").join("Main.cpp")), native("src/Main.cpp"));
}

#[test]
fn for_file_nested_in_build() {
    let (_dir, root) = project();
    let t = RelativeFileNameTransformer::for_file(&root, root.join("build").join("out.sln"));
    assert_eq!(t.transform(&root), "..");
    assert_eq!(t.transform(&root.join("build")), native("../build"));
    assert_eq!(t.transform(&root.join("src").join("Main.cpp")), native("../src/Main.cpp"));
}

// ── Fallbacks ──

#[test]
fn outside_root_is_absolute_and_unchanged() {
    let (dir, root) = project();
    let outside = dir.path().join("elsewhere").join("file.txt");
    let t = RelativeFileNameTransformer::for_directory(&root, &root);

    let result = t.relativize(&outside);
    assert_eq!(result.path, outside.to_string_lossy());
    assert!(matches!(result.fallback, Some(RelativizeError::TargetOutsideRoot { .. })));
}

#[test]
fn reference_outside_root_falls_back() {
    let (dir, root) = project();
    let t = RelativeFileNameTransformer::for_directory(&root, dir.path());
    let target = root.join("src").join("Main.cpp");

    let result = t.relativize(&target);
    assert_eq!(result.path, target.to_string_lossy());
    assert!(matches!(result.fallback, Some(RelativizeError::ReferenceOutsideRoot { .. })));
}

#[cfg(unix)]
#[test]
fn fallback_keeps_dot_dot_segments_uncanonicalized() {
    let (_dir, root) = project();
    let t = RelativeFileNameTransformer::for_directory(&root, &root);
    let target = root.join("..").join("proj-other").join("file.txt");
    assert_eq!(t.transform(&target), canonical::display(&target));
}

#[test]
fn try_transform_surfaces_the_reason() {
    let (dir, root) = project();
    let t = RelativeFileNameTransformer::for_directory(&root, &root);
    let err = t.try_transform(&dir.path().join("elsewhere")).unwrap_err();
    assert!(err.to_string().contains("is outside root"));
}

// ── Containment modes ──

#[test]
fn sibling_with_shared_prefix_is_outside_by_default() {
    let (dir, root) = project();
    let sibling = dir.path().join("proj-other").join("file.txt");
    let t = RelativeFileNameTransformer::for_directory(&root, &root);

    let result = t.relativize(&sibling);
    assert!(result.is_fallback());
    assert_eq!(result.path, sibling.to_string_lossy());
}

#[test]
fn string_prefix_mode_keeps_legacy_sibling_match() {
    let (dir, root) = project();
    let sibling = dir.path().join("proj-other").join("file.txt");
    let t = RelativeFileNameTransformer::for_directory(&root, &root)
        .with_containment(Containment::StringPrefix);

    assert_eq!(t.transform(&sibling), native("other/file.txt"));

    let from_build = RelativeFileNameTransformer::for_directory(&root, root.join("build"))
        .with_containment(Containment::StringPrefix);
    assert_eq!(from_build.transform(&sibling), native("..-other/file.txt"));
}

#[test]
fn string_prefix_mode_agrees_inside_root() {
    let (_dir, root) = project();
    let target = root.join("src").join("Main.cpp");
    for reference in [root.clone(), root.join("build"), root.join("build").join("vs")] {
        let modern = RelativeFileNameTransformer::for_directory(&root, &reference);
        let legacy = modern.clone().with_containment(Containment::StringPrefix);
        assert_eq!(legacy.transform(&target), modern.transform(&target));
        assert_eq!(legacy.transform(&root), modern.transform(&root));
    }
}

#[test]
#[should_panic(expected = "escaped root")]
fn string_prefix_mode_panics_on_sibling_reference() {
    let (dir, root) = project();
    let t = RelativeFileNameTransformer::for_directory(&root, dir.path().join("proj-other"))
        .with_containment(Containment::StringPrefix);
    t.transform(&root.join("src").join("Main.cpp"));
}

// ── Properties ──

#[test]
fn result_resolves_back_to_target() {
    let (_dir, root) = project();
    let references = [
        root.clone(),
        root.join("build"),
        root.join("build").join("vs"),
        root.join("src"),
    ];
    let targets = [
        root.clone(),
        root.join("src").join("Main.cpp"),
        root.join("build").join("vs"),
        root.join("docs").join("readme.md"),
    ];

    for reference in &references {
        let t = RelativeFileNameTransformer::for_directory(&root, reference);
        for target in &targets {
            let relative = t.transform(target);
            let resolved = canonical::canonicalize(&reference.join(&relative)).unwrap();
            assert_eq!(
                resolved,
                canonical::canonicalize(target).unwrap(),
                "{} from {} gave {}",
                target.display(),
                reference.display(),
                relative
            );
        }
    }
}

#[test]
fn relative_results_never_start_with_separator() {
    let (_dir, root) = project();
    let t = RelativeFileNameTransformer::for_directory(&root, root.join("src"));
    for target in [root.join("src"), root.join("build").join("vs"), root.clone()] {
        let out = t.transform(&target);
        assert!(!Path::new(&out).is_absolute(), "{}", out);
        assert!(!out.starts_with(MAIN_SEPARATOR_STR));
    }
}

#[test]
fn relativize_all_preserves_order() {
    let (dir, root) = project();
    let t = RelativeFileNameTransformer::for_directory(&root, root.join("build"));
    let targets = vec![
        root.join("src").join("Main.cpp"),
        dir.path().join("elsewhere"),
        root.clone(),
    ];

    let results = t.relativize_all(&targets);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].path, native("../src/Main.cpp"));
    assert!(results[1].is_fallback());
    assert_eq!(results[2].path, "..");
}

#[test]
fn transformer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RelativeFileNameTransformer>();

    let (_dir, root) = project();
    let t = RelativeFileNameTransformer::for_directory(&root, &root);
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| assert_eq!(t.transform(&root.join("src")), "src"));
        }
    });
}

#[cfg(unix)]
#[test]
fn root_given_through_symlink() {
    let (dir, root) = project();
    let link = dir.path().join("link");
    std::os::unix::fs::symlink(&root, &link).unwrap();

    let t = RelativeFileNameTransformer::for_directory(&link, root.join("build"));
    assert_eq!(t.transform(&link.join("src").join("Main.cpp")), "../src/Main.cpp");
}
