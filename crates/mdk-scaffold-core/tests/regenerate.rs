use mdk_scaffold_core::config::PlatformConfig;
use mdk_scaffold_core::solution::SeededAllocator;
use mdk_scaffold_core::templates::store::SHARED_GROUP_ID;
use mdk_scaffold_core::workspace::DiskMutator;
use mdk_scaffold_core::{Generator, RandomAllocator, WorkspaceLayout};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn touch(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn sample_workspace() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    touch(root, "Mixins/Bar/Bar.cs", "class Bar {}");
    touch(root, "Mixins/Bar/Stale.projitems", "stale");
    touch(root, "Scripts/A/Old.csproj", "<Project>A</Project>");
    touch(root, "Scripts/A/Program.cs", "");
    touch(root, "Scripts/B/B.csproj", "<Project>B</Project>");
    touch(root, "Scripts/B/Renamed.mdk.ini", "type=old");
    touch(root, "Tests/C/C.csproj", "<Project>C</Project>");
    touch(root, "Scripts/README.md", "not a project");
    tmp
}

fn linux_platform() -> PlatformConfig {
    PlatformConfig::for_os("linux", Some("/home/dev")).unwrap()
}

#[test]
fn test_scripts_folder_is_repaired() {
    let tmp = sample_workspace();
    let layout = WorkspaceLayout::default();
    let platform = linux_platform();

    Generator::new(tmp.path(), &layout, &platform)
        .run(&mut DiskMutator, &mut RandomAllocator)
        .unwrap();

    let script_a = tmp.path().join("Scripts/A");
    assert_eq!(
        file_names(&script_a),
        vec!["A.csproj", "A.mdk.ini", "Program.cs"]
    );
    assert_eq!(
        fs::read_to_string(script_a.join("A.csproj")).unwrap(),
        "<Project>A</Project>"
    );

    let ini = fs::read_to_string(script_a.join("A.mdk.ini")).unwrap();
    assert!(ini.starts_with("[mdk]\n"));
    assert!(ini.contains(&format!("output={}\n", platform.output)));
    assert!(ini.contains(&format!("binarypath={}\n", platform.binary_path)));

    let script_b = tmp.path().join("Scripts/B");
    assert_eq!(file_names(&script_b), vec!["B.csproj", "B.mdk.ini"]);
}

#[test]
fn test_mixin_keeps_single_projitems_with_fixed_group() {
    let tmp = sample_workspace();
    let layout = WorkspaceLayout::default();
    let platform = linux_platform();

    Generator::new(tmp.path(), &layout, &platform)
        .run(&mut DiskMutator, &mut RandomAllocator)
        .unwrap();

    let mixin = tmp.path().join("Mixins/Bar");
    assert_eq!(file_names(&mixin), vec!["Bar.cs", "Bar.projitems"]);
    let projitems = fs::read_to_string(mixin.join("Bar.projitems")).unwrap();
    assert!(projitems.contains(&format!("<SharedGUID>{}</SharedGUID>", SHARED_GROUP_ID)));
}

#[test]
fn test_solution_lists_scripts_then_tests_with_distinct_ids() {
    let tmp = sample_workspace();
    let layout = WorkspaceLayout::default();
    let platform = PlatformConfig::windows();

    let summary = Generator::new(tmp.path(), &layout, &platform)
        .run(&mut DiskMutator, &mut RandomAllocator)
        .unwrap();

    let mut names: Vec<_> = summary.entries.iter().map(|e| e.name.clone()).collect();
    // Listing order within a category is platform-dependent
    names[..2].sort();
    assert_eq!(names, vec!["A", "B", "C"]);

    let ids: HashSet<_> = summary.entries.iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), 3);

    let sln = fs::read_to_string(tmp.path().join("OmniOS.sln")).unwrap();
    assert_eq!(sln.matches("\nEndProject").count(), 3);
    for entry in &summary.entries {
        let id = entry.id.to_string();
        assert_eq!(sln.matches(&format!("{{{}}}.Debug|Any CPU.ActiveCfg", id)).count(), 1);
        assert_eq!(sln.matches(&format!("{{{}}}.Debug|Any CPU.Build.0", id)).count(), 1);
    }
    assert!(sln.contains("\"Tests\\C\\C.csproj\""));
}

#[test]
fn test_second_run_is_idempotent() {
    let tmp = sample_workspace();
    let layout = WorkspaceLayout::default();
    let platform = linux_platform();
    let generator = Generator::new(tmp.path(), &layout, &platform);

    generator
        .run(&mut DiskMutator, &mut SeededAllocator::new(11))
        .unwrap();
    let ini = fs::read(tmp.path().join("Tests/C/C.mdk.ini")).unwrap();
    let projitems = fs::read(tmp.path().join("Mixins/Bar/Bar.projitems")).unwrap();
    let listing = file_names(&tmp.path().join("Scripts/A"));

    let second = generator
        .run(&mut DiskMutator, &mut SeededAllocator::new(11))
        .unwrap();

    assert_eq!(fs::read(tmp.path().join("Tests/C/C.mdk.ini")).unwrap(), ini);
    assert_eq!(
        fs::read(tmp.path().join("Mixins/Bar/Bar.projitems")).unwrap(),
        projitems
    );
    assert_eq!(file_names(&tmp.path().join("Scripts/A")), listing);
    assert!(second.renames().is_empty());
}

#[test]
fn test_missing_category_folder_fails_without_solution() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "Mixins/Bar/Bar.cs", "");
    touch(tmp.path(), "Scripts/A/A.csproj", "");

    let layout = WorkspaceLayout::default();
    let platform = linux_platform();
    let err = Generator::new(tmp.path(), &layout, &platform)
        .run(&mut DiskMutator, &mut RandomAllocator)
        .unwrap_err();

    assert_eq!(err.code(), "FILESYSTEM_ERROR");
    assert!(!tmp.path().join("OmniOS.sln").exists());
}

#[test]
fn test_layout_file_renames_solution() {
    let tmp = sample_workspace();
    touch(tmp.path(), "scaffold.yaml", "solution: Ship.sln\n");

    let layout = WorkspaceLayout::load(tmp.path()).unwrap();
    let platform = PlatformConfig::windows();
    Generator::new(tmp.path(), &layout, &platform)
        .run(&mut DiskMutator, &mut RandomAllocator)
        .unwrap();

    assert!(tmp.path().join("Ship.sln").is_file());
    assert!(!tmp.path().join("OmniOS.sln").exists());
}

#[cfg(unix)]
#[test]
fn test_symlinked_subproject_is_normalized_and_listed() {
    let tmp = sample_workspace();
    touch(tmp.path(), "shared/Real/Old.csproj", "<Project>Linked</Project>");
    std::os::unix::fs::symlink(
        tmp.path().join("shared/Real"),
        tmp.path().join("Scripts/Linked"),
    )
    .unwrap();

    let layout = WorkspaceLayout::default();
    let platform = PlatformConfig::windows();
    let summary = Generator::new(tmp.path(), &layout, &platform)
        .run(&mut DiskMutator, &mut RandomAllocator)
        .unwrap();

    assert!(summary.entries.iter().any(|e| e.name == "Linked"));
    assert_eq!(
        file_names(&tmp.path().join("shared/Real")),
        vec!["Linked.csproj", "Linked.mdk.ini"]
    );
    let sln = fs::read_to_string(tmp.path().join("OmniOS.sln")).unwrap();
    assert!(sln.contains("\"Scripts\\Linked\\Linked.csproj\""));
}

#[test]
fn test_folder_named_like_a_placeholder_is_written_literally() {
    let tmp = sample_workspace();
    touch(tmp.path(), "Scripts/${name}/${name}.csproj", "<Project/>");

    let layout = WorkspaceLayout::default();
    let platform = PlatformConfig::windows();
    Generator::new(tmp.path(), &layout, &platform)
        .run(&mut DiskMutator, &mut RandomAllocator)
        .unwrap();

    assert!(tmp.path().join("Scripts/${name}/${name}.mdk.ini").is_file());
    let sln = fs::read_to_string(tmp.path().join("OmniOS.sln")).unwrap();
    assert!(sln.contains("= \"${name}\", \"Scripts\\${name}\\${name}.csproj\""));
}
