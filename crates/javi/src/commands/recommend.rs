use log::debug;

use javi_backend::{VersionManager, to_legacy};
use javi_core::{
    ProjectAnalysis, Recommendation, RecommendationSource, analyze_project, latest_for_major,
    recommend as recommend_version,
};

use crate::context::AppContext;
use crate::error::AppError;

/// Analyses the project's manifest and resolves a recommendation against the
/// remote listing. Projects without a manifest get the default recommendation.
pub(crate) async fn project_recommendation(
    context: &AppContext,
    manager: &dyn VersionManager,
) -> (Option<ProjectAnalysis>, Recommendation) {
    let analysis = analyze_project(&context.project_root).await;
    let signals = analysis
        .as_ref()
        .map(|analysis| analysis.signals.clone())
        .unwrap_or_default();

    let recommendation = recommend_version(&signals, |major| async move {
        latest_for_major(manager, &major).await
    })
    .await;

    debug!("Recommendation for {}: {recommendation:?}", context.project_root.display());
    (analysis, recommendation)
}

pub(crate) fn describe(analysis: Option<&ProjectAnalysis>, recommendation: &Recommendation) -> String {
    let origin = match analysis {
        Some(analysis) => {
            let mut parts = vec![analysis.kind.label().to_string()];
            if let Some(java) = &analysis.signals.declared_java_version {
                parts.push(format!("Java {java}"));
            }
            if let Some(framework) = &analysis.signals.declared_framework_version {
                parts.push(format!("Spring Boot {framework}"));
            }
            parts.join(", ")
        }
        None => "no build manifest".to_string(),
    };

    let source = match recommendation.source {
        RecommendationSource::Remote => "",
        RecommendationSource::FallbackTable => " [offline fallback]",
        RecommendationSource::Synthesized => " [unverified]",
    };

    format!(
        "Java version for this project: {} ({origin}){source}",
        recommendation.display
    )
}

pub async fn recommend(context: &AppContext, install: bool, switch: bool) -> Result<(), AppError> {
    let manager = context.manager().await?;
    let (analysis, recommendation) = project_recommendation(context, manager.as_ref()).await;

    println!("{}", describe(analysis.as_ref(), &recommendation));

    if install {
        println!("Installing {}...", recommendation.version);
        manager
            .install(&recommendation.version)
            .await
            .map_err(|error| AppError::operation_failed("Install", error))?;
        println!("Installed {}", recommendation.version);
    } else if switch {
        let version = to_legacy(&recommendation.display);
        manager
            .use_version(&version, None)
            .await
            .map_err(|error| AppError::operation_failed("Switch", error))?;
        println!("Switched to Java version: {}", recommendation.display);
    }

    Ok(())
}
