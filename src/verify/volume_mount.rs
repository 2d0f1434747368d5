//! Volume mount validation (spec §4.5b).

use std::collections::HashSet;

use crate::descriptor::VolumeMountDescriptor;
use crate::names::is_valid_volume_mount_name;
use crate::problem::Problem;

/// Validates one descriptor's volume mounts: duplicate names/paths, name
/// grammar, path shape, and access mode (spec §4.5b).
pub fn validate(mounts: &[VolumeMountDescriptor]) -> Vec<Problem> {
    let mut problems = Vec::new();
    let mut seen_names = HashSet::new();
    let mut seen_paths = HashSet::new();

    for mount in mounts {
        if !seen_names.insert(mount.name.clone()) {
            problems.push(Problem::DuplicateVolumeMountName {
                name: mount.name.clone(),
            });
        }
        if !seen_paths.insert(mount.path.clone()) {
            problems.push(Problem::DuplicateVolumeMountPath {
                path: mount.path.clone(),
            });
        }
        if !is_valid_volume_mount_name(&mount.name) {
            problems.push(Problem::InvalidVolumeMountName {
                name: mount.name.clone(),
            });
        }
        if mount.path.is_empty() {
            problems.push(Problem::EmptyVolumeMountPath {
                name: mount.name.clone(),
            });
        } else {
            if !mount.path.starts_with('/') {
                problems.push(Problem::NonAbsoluteVolumeMountPath {
                    name: mount.name.clone(),
                });
            }
            if mount.path.split('/').any(|segment| segment == "..") {
                problems.push(Problem::BacktrackingVolumeMountPath {
                    name: mount.name.clone(),
                });
            }
        }
        if mount.parsed_access_mode().is_none() {
            problems.push(Problem::InvalidVolumeMountAccessMode {
                name: mount.name.clone(),
                mode: mount.access_mode.clone(),
            });
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::AccessMode;

    #[test]
    fn backtracking_path_is_reported() {
        let mounts = vec![VolumeMountDescriptor::new("data", "/var/../etc", AccessMode::ReadOnlyMany)];
        let problems = validate(&mounts);
        assert!(problems.contains(&Problem::BacktrackingVolumeMountPath { name: "data".into() }));
    }

    #[test]
    fn empty_path_is_reported_not_non_absolute() {
        let mounts = vec![VolumeMountDescriptor::new("data", "", AccessMode::ReadOnlyMany)];
        let problems = validate(&mounts);
        assert_eq!(problems, vec![Problem::EmptyVolumeMountPath { name: "data".into() }]);
    }

    #[test]
    fn relative_path_is_non_absolute() {
        let mounts = vec![VolumeMountDescriptor::new("data", "relative/path", AccessMode::ReadOnlyMany)];
        let problems = validate(&mounts);
        assert!(problems.contains(&Problem::NonAbsoluteVolumeMountPath { name: "data".into() }));
    }

    #[test]
    fn name_length_boundary() {
        let ok_name = "a".repeat(63);
        let bad_name = "a".repeat(64);
        assert!(validate(&[VolumeMountDescriptor::new(&ok_name, "/data", AccessMode::ReadWriteOnce)]).is_empty());
        let problems = validate(&[VolumeMountDescriptor::new(&bad_name, "/data", AccessMode::ReadWriteOnce)]);
        assert!(problems.contains(&Problem::InvalidVolumeMountName { name: bad_name }));
    }

    #[test]
    fn unknown_access_mode_is_reported() {
        let mut mount = VolumeMountDescriptor::new("data", "/data", AccessMode::ReadOnlyMany);
        mount.access_mode = "ReadWriteForever".to_string();
        let problems = validate(std::slice::from_ref(&mount));
        assert!(problems.contains(&Problem::InvalidVolumeMountAccessMode {
            name: "data".into(),
            mode: "ReadWriteForever".into(),
        }));
    }
}
