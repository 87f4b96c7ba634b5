use anyhow::{Context, Result};
use std::{fs, path::Path};
use wickwise_core::WickwiseError;
use wickwise_schemas::{
    file_formats::MaterialFile,
    material::{ComponentCategory, MaterialSpec},
};

pub const SUPPORTED_SCHEMA_VERSION: &str = "1";

/// User-supplied materials loaded from a library directory.
///
/// Files directly in the directory may hold any category. Files inside a
/// category subdirectory (`sample-pad/`, `conjugate-pad/`, `membrane/`,
/// `absorbent-pad/`) may only hold materials of that category.
#[derive(Debug)]
pub struct Library {
    pub materials: Vec<MaterialSpec>,
}

impl Library {
    pub fn load(base_path: &Path) -> Result<Self> {
        println!("Loading material library from '{}'...", base_path.display());

        let mut materials = load_material_files(base_path, None)?;
        for category in ComponentCategory::ALL {
            let dir = base_path.join(category.as_str());
            if dir.is_dir() {
                materials.extend(load_material_files(&dir, Some(category))?);
            }
        }

        println!("Loaded {} custom materials.", materials.len());
        Ok(Self { materials })
    }
}

/// Reads every `*.yaml`/`*.yml` file in one directory, in file-name order.
fn load_material_files(dir_path: &Path, expected: Option<ComponentCategory>) -> Result<Vec<MaterialSpec>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).with_context(|| format!("Failed to read directory: {:?}", dir_path))? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut materials = Vec::new();
    for path in paths {
        let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
        let file: MaterialFile =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse YAML from {:?}", path))?;
        if file.schema_version != SUPPORTED_SCHEMA_VERSION {
            log::warn!(
                "{:?} declares schema version {}, expected {}",
                path,
                file.schema_version,
                SUPPORTED_SCHEMA_VERSION
            );
        }

        for material in file.materials {
            if let Some(expected) = expected {
                if material.category != expected {
                    return Err(WickwiseError::CategoryMismatch {
                        id: material.material_id,
                        expected,
                        actual: material.category,
                    })
                    .with_context(|| format!("In {:?}", path));
                }
            }
            log::debug!("Library material {} ({}) from {:?}", material.material_id, material.category, path);
            materials.push(material);
        }
    }
    Ok(materials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wickwise-library-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    const MEMBRANE_FILE: &str = r#"
schema_version: "1"
materials:
  - material_id: cn-140-custom
    category: membrane
    manufacturer: In-house
    family: Nitrocellulose
    description: Cast in-house, 140 s
    cost: 0.06
    pore_size_um: 7.5
    flow_time_s: 140
    thickness_um: 140
    porosity: 0.84
    protein_binding_ug_cm2: 1550
    chemical_tags: [blocking-buffer, protein]
"#;

    #[test]
    fn loads_top_level_and_category_directories() {
        let dir = scratch_dir("ok");
        fs::write(dir.join("membranes.yaml"), MEMBRANE_FILE).unwrap();
        fs::create_dir_all(dir.join("membrane")).unwrap();
        fs::write(dir.join("membrane").join("more.yml"), MEMBRANE_FILE.replace("cn-140-custom", "cn-140-b")).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let library = Library::load(&dir).unwrap();
        let ids: Vec<&str> = library.materials.iter().map(|m| m.material_id.as_str()).collect();
        assert_eq!(ids, vec!["cn-140-custom", "cn-140-b"]);
    }

    #[test]
    fn wrong_category_directory_is_rejected() {
        let dir = scratch_dir("mismatch");
        fs::create_dir_all(dir.join("absorbent-pad")).unwrap();
        fs::write(dir.join("absorbent-pad").join("oops.yaml"), MEMBRANE_FILE).unwrap();

        let err = Library::load(&dir).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WickwiseError>(),
            Some(WickwiseError::CategoryMismatch { .. })
        ));
    }
}
