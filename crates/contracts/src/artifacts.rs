//! Loader for Hardhat build artifacts.
//!
//! Hardhat writes one JSON file per compiled contract to
//! `artifacts/<sourceName>/<ContractName>.json`, next to a `.dbg.json` file
//! pointing into `artifacts/build-info`. Only the contract files are read.

use {
    alloy::{json_abi::JsonAbi, primitives::Bytes},
    serde::Deserialize,
    std::{
        collections::HashMap,
        fs,
        path::{Path, PathBuf},
        sync::Arc,
    },
};

const BUILD_INFO_DIR: &str = "build-info";
const DEBUG_SUFFIX: &str = ".dbg.json";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("artifact for contract {0:?} not found")]
    UnknownContract(String),
    #[error("multiple artifacts for contract {name:?}, use one of {candidates:?}")]
    AmbiguousContract {
        name: String,
        candidates: Vec<String>,
    },
    #[error("contract {0:?} has no creation bytecode (abstract contract or interface)")]
    NotDeployable(String),
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A single compiled contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    /// Creation bytecode. Empty for interfaces and abstract contracts.
    pub bytecode: Bytes,
}

impl Artifact {
    /// `<sourceName>:<contractName>`, the name Hardhat uses to disambiguate
    /// contracts with the same name in different sources.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    pub fn is_deployable(&self) -> bool {
        !self.bytecode.is_empty()
    }
}

/// All artifacts of a project, indexed by contract name.
#[derive(Debug, Default, Clone)]
pub struct Artifacts {
    by_name: HashMap<String, Vec<Arc<Artifact>>>,
}

impl Artifacts {
    /// Recursively reads every contract artifact below `root`.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, Error> {
        let root = root.as_ref();
        let mut artifacts = Self::default();
        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            let entries = fs::read_dir(&dir).map_err(|source| Error::Io {
                path: dir.clone(),
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| Error::Io {
                    path: dir.clone(),
                    source,
                })?;
                let path = entry.path();
                // Symlinks are not followed, a link cycle would never end.
                let file_type = entry.file_type().map_err(|source| Error::Io {
                    path: path.clone(),
                    source,
                })?;
                if file_type.is_dir() {
                    if path.file_name().is_some_and(|name| name != BUILD_INFO_DIR) {
                        pending.push(path);
                    }
                } else if is_contract_artifact(&path) {
                    artifacts.insert(read_artifact(&path)?);
                }
            }
        }
        tracing::debug!(
            root = %root.display(),
            contracts = artifacts.by_name.len(),
            "loaded build artifacts"
        );
        Ok(artifacts)
    }

    /// Adds an artifact, replacing a previous one with the same fully
    /// qualified name.
    pub fn insert(&mut self, artifact: Artifact) {
        let entries = self
            .by_name
            .entry(artifact.contract_name.clone())
            .or_default();
        entries.retain(|existing| existing.source_name != artifact.source_name);
        entries.push(Arc::new(artifact));
    }

    /// Looks up an artifact by bare contract name (`Greeter`) or by fully
    /// qualified name (`contracts/Greeter.sol:Greeter`).
    pub fn get(&self, name: &str) -> Result<Arc<Artifact>, Error> {
        let (source, contract) = match name.rsplit_once(':') {
            Some((source, contract)) => (Some(source), contract),
            None => (None, name),
        };
        let candidates = self
            .by_name
            .get(contract)
            .into_iter()
            .flatten()
            .filter(|artifact| source.is_none_or(|source| artifact.source_name == source))
            .collect::<Vec<_>>();
        match candidates.as_slice() {
            [] => Err(Error::UnknownContract(name.to_string())),
            [artifact] => Ok(Arc::clone(artifact)),
            _ => Err(Error::AmbiguousContract {
                name: name.to_string(),
                candidates: candidates
                    .iter()
                    .map(|artifact| artifact.fully_qualified_name())
                    .collect(),
            }),
        }
    }

    /// Like [`Artifacts::get`] but additionally requires creation bytecode.
    pub fn deployable(&self, name: &str) -> Result<Arc<Artifact>, Error> {
        let artifact = self.get(name)?;
        if !artifact.is_deployable() {
            return Err(Error::NotDeployable(name.to_string()));
        }
        Ok(artifact)
    }

    /// Contract names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl FromIterator<Artifact> for Artifacts {
    fn from_iter<I: IntoIterator<Item = Artifact>>(iter: I) -> Self {
        let mut artifacts = Self::default();
        for artifact in iter {
            artifacts.insert(artifact);
        }
        artifacts
    }
}

fn is_contract_artifact(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".json") && !name.ends_with(DEBUG_SUFFIX))
}

fn read_artifact(path: &Path) -> Result<Artifact, Error> {
    let content = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}
