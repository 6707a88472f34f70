//! 游戏目录扫描：根据目录中的文件特征判断是游戏库目录还是游戏目录
use std::fs::read_dir;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

/// 默认最大扫描深度
pub const DEFAULT_MAX_DEPTH: usize = 6;

const ARCHIVE_EXTENSIONS: &[&str] = &[".zip", ".7z", ".rar", ".mpk"];
const ENGINE_DATA_EXTENSIONS: &[&str] = &[
    ".xp3", ".arc", ".pfs", ".pak", ".dat", ".gar", ".iar", ".pck", ".assets", ".dll",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirKind {
    Lib,
    Game(GameDirKind),
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameDirKind {
    Archive,
    Dir,
}

/// 扫描得到的候选游戏
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedGame {
    pub name: String,
    pub path: PathBuf,
    pub executable: Option<PathBuf>,
}

/// 扫描候选游戏的协作者
pub trait GameScanner: Send + Sync {
    fn scan(&self, root: &Path) -> Result<Vec<ScannedGame>, String>;
}

#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    max_depth: usize,
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DirectoryScanner {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }
}

impl GameScanner for DirectoryScanner {
    fn scan(&self, root: &Path) -> Result<Vec<ScannedGame>, String> {
        if !root.is_dir() {
            return Err(format!("路径不存在或不是目录: {}", root.display()));
        }

        let mut games = Vec::new();
        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(self.max_depth)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("跳过无法访问的路径: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }

            match scan_dir_kind(entry.path()) {
                // 游戏库目录继续向下遍历
                DirKind::Lib => {}
                DirKind::Game(GameDirKind::Dir) => {
                    debug!("Found game directory: {}", entry.path().display());
                    games.push(ScannedGame {
                        name: entry.file_name().to_string_lossy().into_owned(),
                        path: entry.path().to_path_buf(),
                        executable: find_executable(entry.path()),
                    });
                    walker.skip_current_dir();
                }
                DirKind::Game(GameDirKind::Archive) => {
                    debug!("Found compressed game directory: {}", entry.path().display());
                    walker.skip_current_dir();
                }
                DirKind::Unknown => walker.skip_current_dir(),
            }
        }

        log::info!("扫描 {} 完成，找到 {} 个游戏", root.display(), games.len());
        Ok(games)
    }
}

/// 目录中按文件名排序的第一个 .exe
pub fn find_executable(dir: &Path) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("exe"))
                    .unwrap_or(false)
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// 单层目录的文件特征
#[derive(Debug, Default)]
struct DirSummary {
    has_files: bool,
    has_dirs: bool,
    only_archives: bool,
    exe: bool,
    engine_data: bool,
    signature: bool,
    archives: usize,
    volumes: usize,
    savedata: bool,
    sub_dirs: Vec<PathBuf>,
}

impl DirSummary {
    fn read(dir: &Path) -> Self {
        let mut summary = DirSummary {
            only_archives: true,
            ..Default::default()
        };
        let Ok(entries) = read_dir(dir) else {
            return summary;
        };

        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_lowercase();
            if path.is_dir() {
                summary.has_dirs = true;
                if name == "savedata" {
                    summary.savedata = true;
                }
                summary.sub_dirs.push(path);
                continue;
            }
            if !path.is_file() {
                continue;
            }
            summary.has_files = true;

            // 从第一个点开始取扩展名，这样 .exe.sig 之类也能识别
            let ext = name.find('.').map(|pos| &name[pos..]).unwrap_or("");
            let is_archive = ARCHIVE_EXTENSIONS.iter().any(|a| ext.ends_with(a)) || ext.ends_with(".iso");
            if is_archive {
                summary.archives += 1;
                if ext.contains(".part") && (ext.ends_with(".rar") || ext.ends_with(".7z")) {
                    summary.volumes += 1;
                }
            }
            if !ARCHIVE_EXTENSIONS.iter().any(|a| ext.ends_with(a)) {
                summary.only_archives = false;
            }

            if ext == ".exe.sig" || ext == ".xp3.sig" {
                summary.signature = true;
                continue;
            }
            // 可执行文件和引擎数据只看最后一个扩展名，文件名里可以带版本号之类的点
            let last = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
                .unwrap_or_default();
            if last == ".exe" {
                summary.exe = true;
            } else if ENGINE_DATA_EXTENSIONS.contains(&last.as_str()) {
                summary.engine_data = true;
            }
        }
        summary
    }

    fn looks_like_game(&self) -> bool {
        self.exe && (self.engine_data || self.signature)
    }
}

fn scan_dir_kind(dir: &Path) -> DirKind {
    let summary = DirSummary::read(dir);

    if summary.has_dirs && !summary.has_files {
        return DirKind::Lib;
    }
    if summary.has_dirs && summary.has_files && summary.only_archives {
        return DirKind::Lib;
    }
    if summary.looks_like_game() || summary.savedata {
        return DirKind::Game(GameDirKind::Dir);
    }

    // 只有一个子目录像游戏时，整个目录算作游戏目录
    let sub_games = summary
        .sub_dirs
        .iter()
        .filter(|sub| DirSummary::read(sub).looks_like_game())
        .count();
    if sub_games == 1 {
        return DirKind::Game(GameDirKind::Dir);
    }
    if summary.archives == 1 {
        return DirKind::Game(GameDirKind::Archive);
    }
    if summary.archives > 0 && summary.volumes == summary.archives {
        return DirKind::Game(GameDirKind::Archive);
    }

    DirKind::Unknown
}
