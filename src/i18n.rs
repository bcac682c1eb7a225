//! Localized display text for report labels and failure messages
//!
//! Two locales ship with the tool: English (the fallback) and Korean.

use std::fmt;
use std::str::FromStr;

use crate::error::SizeReportError;

/// Supported report languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Korean
    Ko,
}

impl Locale {
    /// Every supported locale code
    pub const SUPPORTED: [&'static str; 2] = ["en", "ko"];

    /// Locale code as used in configuration
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ko => "ko",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = SizeReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "ko" => Ok(Locale::Ko),
            other => Err(SizeReportError::UnsupportedLocale {
                value: other.to_string(),
            }),
        }
    }
}

/// Fixed message keys
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    UnsupportedLanguage,
    IncludePmInBuildScript,
    InvalidCompressionType,
    InvalidPackageName,
    EmptyTitle,
    EmptyLatestCommit,
    EmptyCheckCommit,
    PackageFile,
    PageRoute,
    DiffStatus,
    BeforeSize,
    AfterSize,
    SizeChanged,
    ViewUnchangedPackageFiles,
    ViewUnchangedPageRoutes,
    TotalSize,
    TotalChange,
    StatusUnchanged,
    StatusAdded,
    StatusRemoved,
    StatusModified,
    DependencyPackage,
    PreviousVersion,
    UpdatedVersion,
    BundleSize,
    PackageAdded,
    PackageUpdated,
    PackageDowngraded,
    PackageRemoved,
    Readme,
    InternalError,
}

/// Source of display text, keyed by [`MessageKey`]
pub trait Translator {
    /// Locale-resolved text for `key`
    fn text(&self, key: MessageKey) -> &'static str;
}

/// Built-in message table for one locale, falling back to English
#[derive(Debug, Clone, Copy, Default)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    /// Create a message table for `locale`
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Locale this table resolves to
    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl Translator for Messages {
    fn text(&self, key: MessageKey) -> &'static str {
        match self.locale {
            Locale::En => english(key),
            Locale::Ko => korean(key).unwrap_or_else(|| english(key)),
        }
    }
}

fn english(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        UnsupportedLanguage => {
            "An unsupported language value has been provided. Please use either `en` or `ko`."
        }
        IncludePmInBuildScript => {
            "The `build_script` provided to the action includes values such as `npm`, `pnpm`, or `yarn`. Please remove these."
        }
        InvalidCompressionType => {
            "Unknown compression type provided. Only `none`, `gzip`, or `brotli` are allowed. Please check the configuration."
        }
        InvalidPackageName => {
            "The 'name' field is missing in the package.json file. (file location: "
        }
        EmptyTitle => "### 🔍 No files have been changed",
        EmptyLatestCommit => "Latest commit:",
        EmptyCheckCommit => "Please check your commit.",
        PackageFile => "File",
        PageRoute => "🪧 Page Routes",
        DiffStatus => "Status",
        BeforeSize => "Previous Size",
        AfterSize => "Updated Size",
        SizeChanged => "Changed",
        ViewUnchangedPackageFiles => "View Unchanged Package Files",
        ViewUnchangedPageRoutes => "View Unchanged Page Routes",
        TotalSize => "Total Sizes",
        TotalChange => "Total Changes",
        StatusUnchanged => "Unchanged",
        StatusAdded => "Added",
        StatusRemoved => "Removed",
        StatusModified => "Modified",
        DependencyPackage => "Package",
        PreviousVersion => "Previous Version",
        UpdatedVersion => "Updated Version",
        BundleSize => "Bundle Size (Max)",
        PackageAdded => "Added",
        PackageUpdated => "Updated",
        PackageDowngraded => "Downgraded",
        PackageRemoved => "Removed",
        Readme => "README.md",
        InternalError => "An unknown error occurred. If this persists, please report it.",
    }
}

fn korean(key: MessageKey) -> Option<&'static str> {
    use MessageKey::*;
    let text = match key {
        UnsupportedLanguage => {
            "지원하지 않는 language 값입니다. `en` 또는 `ko` 중 하나를 사용해주세요."
        }
        IncludePmInBuildScript => {
            "action에 주입한 `build_script`에 `npm`, `pnpm`, `yarn` 등의 값이 포함되어 있습니다. 이를 제거해주세요."
        }
        InvalidCompressionType => {
            "알 수 없는 compression type 입니다. compression에는 `none`, `gzip`, `brotli`만 사용가능합니다. 설정을 확인해주세요."
        }
        InvalidPackageName => "package.json에 name 필드가 누락되어 있습니다. (파일 위치: ",
        EmptyTitle => "### 🔍 크기가 변경된 파일이 없습니다.",
        EmptyLatestCommit => "마지막 commit:",
        EmptyCheckCommit => "commit을 확인해주세요.",
        PackageFile => "파일",
        PageRoute => "🪧 페이지 경로",
        DiffStatus => "상태",
        BeforeSize => "이전 크기",
        AfterSize => "변경 후 크기",
        SizeChanged => "증감",
        ViewUnchangedPackageFiles => "변경되지 않은 패키지 파일 보기",
        ViewUnchangedPageRoutes => "변경되지 않은 페이지 경로 보기",
        TotalSize => "전체 파일 사이즈",
        TotalChange => "변경된 파일 사이즈",
        StatusAdded => "추가됨",
        StatusRemoved => "삭제됨",
        StatusModified => "수정됨",
        DependencyPackage => "패키지",
        PreviousVersion => "이전 버전",
        UpdatedVersion => "변경된 버전",
        BundleSize => "번들 크기 (최대)",
        PackageAdded => "추가됨",
        PackageUpdated => "업데이트됨",
        PackageDowngraded => "다운그레이드됨",
        PackageRemoved => "삭제됨",
        Readme => "README.ko.md",
        InternalError => "알 수 없는 오류가 발생했습니다. 계속 발생된다면, 제보 부탁드립니다.",
        StatusUnchanged => return None,
    };
    Some(text)
}
