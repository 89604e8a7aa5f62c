use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

/// Build manifest formats, in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Maven,
    Gradle,
    GradleKotlin,
}

impl ManifestKind {
    pub const DISCOVERY_ORDER: [Self; 3] = [Self::Maven, Self::Gradle, Self::GradleKotlin];

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Maven => "pom.xml",
            Self::Gradle => "build.gradle",
            Self::GradleKotlin => "build.gradle.kts",
        }
    }

    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::DISCOVERY_ORDER
            .into_iter()
            .find(|kind| kind.file_name() == name)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Maven => "Maven",
            Self::Gradle | Self::GradleKotlin => "Gradle",
        }
    }
}

/// Version declarations found in a manifest. Absent fields were not declared
/// or did not match any known pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSignals {
    pub declared_java_version: Option<String>,
    pub declared_framework_version: Option<String>,
}

impl ProjectSignals {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declared_java_version.is_none() && self.declared_framework_version.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAnalysis {
    pub kind: ManifestKind,
    pub manifest: PathBuf,
    pub signals: ProjectSignals,
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("manifest pattern is valid")
}

static MAVEN_JAVA: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        pattern(r"<java\.version>\s*([^<\s]+)\s*</java\.version>"),
        pattern(r"<maven\.compiler\.release>\s*([^<\s]+)\s*</maven\.compiler\.release>"),
        pattern(r"<maven\.compiler\.source>\s*([^<\s]+)\s*</maven\.compiler\.source>"),
    ]
});

static MAVEN_BOOT_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"<spring-boot\.version>\s*([^<\s]+)\s*</spring-boot\.version>"));

static MAVEN_PARENT: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?s)<parent>(.*?)</parent>"));

static MAVEN_VERSION_TAG: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"<version>\s*([^<\s]+)\s*</version>"));

static GRADLE_JAVA: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        pattern(r#"sourceCompatibility\s*=\s*['"]([^'"]+)['"]"#),
        pattern(r"JavaLanguageVersion\.of\(\s*(\d+)\s*\)"),
        pattern(r"JavaVersion\.VERSION_(\d+(?:_\d+)?)"),
    ]
});

static GRADLE_BOOT: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        pattern(r#"spring-boot-gradle-plugin:([^'"\s)]+)"#),
        pattern(r#"id\s*\(?\s*['"]org\.springframework\.boot['"]\s*\)?\s*version\s*\(?\s*['"]([^'"]+)['"]"#),
    ]
});

fn first_capture(patterns: &[Regex], content: &str) -> Option<String> {
    patterns.iter().find_map(|regex| {
        regex
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// Extracts declared versions from manifest text. Never touches the
/// filesystem.
#[must_use]
pub fn analyze(content: &str, kind: ManifestKind) -> ProjectSignals {
    match kind {
        ManifestKind::Maven => ProjectSignals {
            declared_java_version: first_capture(MAVEN_JAVA.as_slice(), content),
            declared_framework_version: first_capture(
                std::slice::from_ref(&*MAVEN_BOOT_PROPERTY),
                content,
            )
            .or_else(|| maven_boot_parent(content)),
        },
        ManifestKind::Gradle | ManifestKind::GradleKotlin => ProjectSignals {
            declared_java_version: first_capture(GRADLE_JAVA.as_slice(), content)
                .map(|version| version.replace('_', ".")),
            declared_framework_version: first_capture(GRADLE_BOOT.as_slice(), content),
        },
    }
}

fn maven_boot_parent(content: &str) -> Option<String> {
    let block = MAVEN_PARENT.captures(content)?.get(1)?.as_str();
    if !block.contains("spring-boot-starter-parent") {
        return None;
    }
    first_capture(std::slice::from_ref(&*MAVEN_VERSION_TAG), block)
}

/// First manifest present in `root`, checked in [`ManifestKind::DISCOVERY_ORDER`].
pub async fn discover_manifest(root: &Path) -> Option<(ManifestKind, PathBuf)> {
    for kind in ManifestKind::DISCOVERY_ORDER {
        let path = root.join(kind.file_name());
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Some((kind, path));
        }
    }
    None
}

/// Finds and analyzes the project's manifest. Unreadable manifests are
/// logged and treated as absent.
pub async fn analyze_project(root: &Path) -> Option<ProjectAnalysis> {
    let (kind, manifest) = discover_manifest(root).await?;

    let content = match tokio::fs::read_to_string(&manifest).await {
        Ok(content) => content,
        Err(error) => {
            warn!("Failed to read {}: {error}", manifest.display());
            return None;
        }
    };

    let signals = analyze(&content, kind);
    debug!("Analyzed {}: {signals:?}", manifest.display());

    Some(ProjectAnalysis {
        kind,
        manifest,
        signals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r"
<project>
  <parent>
    <groupId>org.springframework.boot</groupId>
    <artifactId>spring-boot-starter-parent</artifactId>
    <version>3.2.1</version>
    <relativePath/>
  </parent>
  <version>0.0.1-SNAPSHOT</version>
  <properties>
    <java.version>21</java.version>
  </properties>
</project>";

    #[test]
    fn maven_reads_java_version_and_boot_parent() {
        let signals = analyze(POM, ManifestKind::Maven);

        assert_eq!(signals.declared_java_version.as_deref(), Some("21"));
        assert_eq!(signals.declared_framework_version.as_deref(), Some("3.2.1"));
    }

    #[test]
    fn maven_boot_property_wins_over_parent() {
        let content = format!(
            "{POM}\n<properties><spring-boot.version>2.7.18</spring-boot.version></properties>"
        );
        let signals = analyze(&content, ManifestKind::Maven);

        assert_eq!(signals.declared_framework_version.as_deref(), Some("2.7.18"));
    }

    #[test]
    fn maven_falls_back_to_compiler_properties() {
        let content = "<properties><maven.compiler.source>1.8</maven.compiler.source></properties>";
        let signals = analyze(content, ManifestKind::Maven);

        assert_eq!(signals.declared_java_version.as_deref(), Some("1.8"));
        assert_eq!(signals.declared_framework_version, None);
    }

    #[test]
    fn maven_ignores_unrelated_parent() {
        let content = "<parent><artifactId>company-parent</artifactId><version>9.9</version></parent>";
        let signals = analyze(content, ManifestKind::Maven);

        assert!(signals.is_empty());
    }

    #[test]
    fn gradle_reads_source_compatibility_and_plugin() {
        let content = r"
plugins {
    id 'org.springframework.boot' version '3.1.5'
}
sourceCompatibility = '17'
";
        let signals = analyze(content, ManifestKind::Gradle);

        assert_eq!(signals.declared_java_version.as_deref(), Some("17"));
        assert_eq!(signals.declared_framework_version.as_deref(), Some("3.1.5"));
    }

    #[test]
    fn gradle_reads_buildscript_classpath_plugin() {
        let content = r#"
buildscript {
    dependencies {
        classpath("org.springframework.boot:spring-boot-gradle-plugin:2.7.0")
    }
}
sourceCompatibility = JavaVersion.VERSION_1_8
"#;
        let signals = analyze(content, ManifestKind::Gradle);

        assert_eq!(signals.declared_java_version.as_deref(), Some("1.8"));
        assert_eq!(signals.declared_framework_version.as_deref(), Some("2.7.0"));
    }

    #[test]
    fn kotlin_dsl_reads_toolchain_and_plugin() {
        let content = r#"
plugins {
    id("org.springframework.boot") version "3.3.0"
}
java {
    toolchain {
        languageVersion = JavaLanguageVersion.of(21)
    }
}
"#;
        let signals = analyze(content, ManifestKind::GradleKotlin);

        assert_eq!(signals.declared_java_version.as_deref(), Some("21"));
        assert_eq!(signals.declared_framework_version.as_deref(), Some("3.3.0"));
    }

    #[test]
    fn unmatched_content_yields_no_signals() {
        assert!(analyze("", ManifestKind::Maven).is_empty());
        assert!(analyze("apply plugin: 'java'", ManifestKind::Gradle).is_empty());
    }

    #[test]
    fn manifest_kind_file_names_round_trip() {
        for kind in ManifestKind::DISCOVERY_ORDER {
            assert_eq!(ManifestKind::from_file_name(kind.file_name()), Some(kind));
        }
        assert_eq!(ManifestKind::from_file_name("package.json"), None);
    }

    #[tokio::test]
    async fn discovery_prefers_maven_over_gradle() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(temp_dir.path().join("build.gradle"), "sourceCompatibility = '11'")
            .expect("write gradle");
        std::fs::write(temp_dir.path().join("pom.xml"), POM).expect("write pom");

        let analysis = analyze_project(temp_dir.path())
            .await
            .expect("manifest should be found");

        assert_eq!(analysis.kind, ManifestKind::Maven);
        assert_eq!(analysis.signals.declared_java_version.as_deref(), Some("21"));
    }

    #[tokio::test]
    async fn discovery_finds_kotlin_script_last() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(
            temp_dir.path().join("build.gradle.kts"),
            "java { toolchain { languageVersion.set(JavaLanguageVersion.of(17)) } }",
        )
        .expect("write kts");

        let analysis = analyze_project(temp_dir.path())
            .await
            .expect("manifest should be found");

        assert_eq!(analysis.kind, ManifestKind::GradleKotlin);
        assert_eq!(analysis.signals.declared_java_version.as_deref(), Some("17"));
    }

    #[tokio::test]
    async fn discovery_without_manifest_is_none() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        assert!(analyze_project(temp_dir.path()).await.is_none());
    }
}
