// src/fetcher/resources.rs

use crate::{constants, error::AppResult, models::ResourceLink};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// 每个链接占三行：`名称:`、URL、空行
pub fn render_resource_list(links: &[ResourceLink]) -> String {
    links
        .iter()
        .map(|link| format!("{}:\n{}\n\n", link.name, link.url))
        .collect()
}

pub fn write_resource_list(links: &[ResourceLink], target_dir: &Path, stem: &str) -> AppResult<PathBuf> {
    let path = target_dir.join(format!("{}{}", stem, constants::RESOURCES_FILE_SUFFIX));
    fs::write(&path, render_resource_list(links))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_resource_list() {
        let links = vec![
            ResourceLink { name: "Slides".into(), url: "A".into() },
            ResourceLink { name: "Exercise".into(), url: "B".into() },
        ];
        assert_eq!(render_resource_list(&links), "Slides:\nA\n\nExercise:\nB\n\n");
        assert_eq!(render_resource_list(&[]), "");
    }
}
