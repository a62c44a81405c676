//! Static in-memory course catalog.

use crate::scoring::keyword_overlap;
use async_trait::async_trait;
use guru_core::Result;
use guru_core::retrieval::{
    ContentKind, CourseCatalog, RetrievalResult, SourceOrigin, SourceSignal,
};
use std::collections::HashMap;

/// One course on the platform.
#[derive(Debug, Clone)]
pub struct CourseEntry {
    pub url: String,
    pub title: String,
    pub summary: String,
    /// Lesson bodies in syllabus order
    pub lessons: Vec<String>,
}

/// Course index backed by a fixed list, built once at wiring time.
#[derive(Default)]
pub struct StaticCourseCatalog {
    courses: Vec<CourseEntry>,
}

impl StaticCourseCatalog {
    pub fn new(courses: Vec<CourseEntry>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl CourseCatalog for StaticCourseCatalog {
    async fn search(&self, query: &str) -> Result<Vec<SourceSignal>> {
        let mut signals = Vec::new();
        for course in &self.courses {
            let score = keyword_overlap(query, &format!("{} {}", course.title, course.summary));
            if score > 0.0 {
                signals.push(SourceSignal {
                    url: course.url.clone(),
                    origin: SourceOrigin::Course,
                    category: "course".to_string(),
                    title: course.title.clone(),
                    relevance_score: score,
                    snippet: Some(course.summary.clone()),
                });
            }
        }
        tracing::debug!(count = signals.len(), "course catalog: search");
        Ok(signals)
    }

    async fn fetch(&self, source: &SourceSignal) -> Result<Vec<RetrievalResult>> {
        let Some(course) = self.courses.iter().find(|c| c.url == source.url) else {
            return Ok(vec![]);
        };

        let results = course
            .lessons
            .iter()
            .enumerate()
            .map(|(i, lesson)| {
                let mut metadata = HashMap::new();
                metadata.insert("course".to_string(), course.title.clone());
                metadata.insert("lesson".to_string(), (i + 1).to_string());
                RetrievalResult {
                    source_id: course.url.clone(),
                    content: lesson.clone(),
                    content_type: ContentKind::Course,
                    relevance_score: source.relevance_score,
                    metadata,
                }
            })
            .collect();
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StaticCourseCatalog {
        StaticCourseCatalog::new(vec![CourseEntry {
            url: "course://car-electrics".to_string(),
            title: "Car electrics fundamentals".to_string(),
            summary: "Battery, charging and starting systems".to_string(),
            lessons: vec![
                "Lesson on battery health".to_string(),
                "Lesson on the starter circuit".to_string(),
            ],
        }])
    }

    #[tokio::test]
    async fn test_search_matches_title_and_summary() {
        let catalog = catalog();
        let hits = catalog.search("battery charging").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].origin, SourceOrigin::Course);
        assert!(catalog.search("sourdough").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_returns_one_result_per_lesson() {
        let catalog = catalog();
        let hits = catalog.search("battery").await.unwrap();
        let results = catalog.fetch(&hits[0]).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.content_type == ContentKind::Course));
        assert_eq!(results[1].metadata.get("lesson").map(String::as_str), Some("2"));
    }
}
