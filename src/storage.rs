use std::io;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use tokio::fs;
use tracing::{debug, info, warn};

/// 卡片的三个照片槽位，名称同时也是 multipart 字段名和文件名后缀
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSlot {
    Passport,
    Front,
    Back,
}

impl PhotoSlot {
    pub const ALL: [PhotoSlot; 3] = [PhotoSlot::Passport, PhotoSlot::Front, PhotoSlot::Back];

    pub fn field_name(self) -> &'static str {
        match self {
            PhotoSlot::Passport => "passportPhoto",
            PhotoSlot::Front => "frontPhoto",
            PhotoSlot::Back => "backPhoto",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.field_name() == name)
    }
}

#[derive(Debug, Clone)]
pub struct CardPhotos {
    pub passport: Bytes,
    pub front: Bytes,
    pub back: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPhotoPaths {
    pub passport: PathBuf,
    pub front: PathBuf,
    pub back: PathBuf,
}

impl CardPhotoPaths {
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [self.passport.as_path(), self.front.as_path(), self.back.as_path()].into_iter()
    }
}

/// 上传照片的落盘目录
#[derive(Debug, Clone)]
pub struct PhotoStorage {
    root: PathBuf,
}

impl PhotoStorage {
    pub async fn new(root: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&root).await?;
        info!(path = %root.display(), "Photo storage initialized");
        Ok(Self { root })
    }

    /// `<root>/<prefix>-<slot>.jpg`，三个路径共用同一个前缀
    pub fn card_photo_paths(&self, prefix: &str) -> CardPhotoPaths {
        let path = |slot: PhotoSlot| self.root.join(format!("{}-{}.jpg", prefix, slot.field_name()));
        CardPhotoPaths {
            passport: path(PhotoSlot::Passport),
            front: path(PhotoSlot::Front),
            back: path(PhotoSlot::Back),
        }
    }

    pub async fn write_card_photos(&self, paths: &CardPhotoPaths, photos: &CardPhotos) -> io::Result<()> {
        futures_util::try_join!(
            fs::write(&paths.passport, &photos.passport),
            fs::write(&paths.front, &photos.front),
            fs::write(&paths.back, &photos.back),
        )?;
        debug!(passport = %paths.passport.display(), "Card photos written");
        Ok(())
    }

    pub async fn remove_card_photos(&self, paths: &CardPhotoPaths) {
        self.remove_files(paths.iter()).await;
    }

    /// 尽力删除，文件不存在不算错误；存储目录之外的路径一律跳过
    pub async fn remove_files<'a>(&self, paths: impl IntoIterator<Item = &'a Path>) {
        for path in paths {
            if !path.starts_with(&self.root) {
                warn!(path = %path.display(), "Refusing to remove file outside storage root");
                continue;
            }
            match fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), "Failed to remove photo: {}", e),
            }
        }
    }
}
