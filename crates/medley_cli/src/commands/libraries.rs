//! Library management command implementations.

use super::{report, require_data};
use medley_api::{LibraryPathUpdate, NewLibraryPath, PathType};
use medley_client::ResourceClient;
use medley_sync::SyncEngine;
use std::error::Error;

/// Lists configured library paths.
pub async fn list<C: ResourceClient + 'static>(engine: &SyncEngine<C>) -> Result<(), Box<dyn Error>> {
    let libraries = require_data("libraries", engine.fetch_libraries().await)?;

    if libraries.is_empty() {
        println!("no library paths configured");
        return Ok(());
    }

    for lib in libraries.iter() {
        let name = lib.name.as_deref().unwrap_or("-");
        let scan = if lib.scan_enabled { "scan" } else { "noscan" };
        let deep = if lib.deep_scan { " deep" } else { "" };
        println!(
            "{:>4}  {:<40} {:<16} {:?} [{scan}{deep}]",
            lib.id, lib.path, name, lib.path_type
        );
    }

    Ok(())
}

/// Adds a library path.
pub async fn add<C: ResourceClient + 'static>(
    engine: &SyncEngine<C>,
    path: String,
    name: Option<String>,
    deep_scan: bool,
    path_type: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let mut request = NewLibraryPath::new(path);
    if let Some(name) = name {
        request = request.with_name(name);
    }
    if deep_scan {
        request = request.with_deep_scan(true);
    }
    if let Some(path_type) = path_type {
        request = request.with_path_type(parse_path_type(&path_type)?);
    }

    report(engine.create_library(request).await)
}

/// Updates a library path.
#[allow(clippy::too_many_arguments)]
pub async fn update<C: ResourceClient + 'static>(
    engine: &SyncEngine<C>,
    id: u64,
    path: Option<String>,
    name: Option<String>,
    scan_enabled: Option<bool>,
    deep_scan: Option<bool>,
    quality_threshold: Option<f64>,
    deletion_priority: Option<u32>,
) -> Result<(), Box<dyn Error>> {
    let update = LibraryPathUpdate {
        path,
        name,
        scan_enabled,
        deep_scan,
        quality_threshold,
        deletion_priority,
        ..Default::default()
    };

    if update.is_empty() {
        return Err("nothing to update: pass at least one field".into());
    }

    report(engine.update_library(id, update).await)
}

/// Removes a library path.
pub async fn remove<C: ResourceClient + 'static>(
    engine: &SyncEngine<C>,
    id: u64,
) -> Result<(), Box<dyn Error>> {
    report(engine.delete_library(id).await)
}

fn parse_path_type(value: &str) -> Result<PathType, Box<dyn Error>> {
    match value {
        "album" => Ok(PathType::Album),
        "compilation" => Ok(PathType::Compilation),
        "recent" => Ok(PathType::Recent),
        "general" => Ok(PathType::General),
        other => Err(format!(
            "unknown path type {other:?}; expected album, compilation, recent or general"
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_type_parsing() {
        assert_eq!(parse_path_type("album").unwrap(), PathType::Album);
        assert_eq!(parse_path_type("general").unwrap(), PathType::General);
        assert!(parse_path_type("mixtape").is_err());
    }
}
