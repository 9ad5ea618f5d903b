use crate::core::controller::{SubmissionController, SubmissionOutcome};
use crate::core::view::{render_document, ResultsView};
use crate::domain::model::ProfileRequest;
use crate::domain::ports::{RecommendationSource, Storage};
use crate::utils::error::{AppError, Result};

pub const INDEX_FILE: &str = "index.html";
pub const ERROR_FILE: &str = "error.html";

pub fn page_file_name(page: usize) -> String {
    format!("page-{}.html", page)
}

#[derive(Debug)]
pub struct SessionReport {
    pub output_path: String,
    pub files: Vec<String>,
    pub card_count: usize,
    pub fallback: bool,
    pub view: ResultsView,
}

/// One submit-render-export cycle: sends the profile, renders the response
/// and writes every results page as a standalone document.
pub struct RecommendationSession<S: Storage, R: RecommendationSource> {
    storage: S,
    controller: SubmissionController<R>,
    output_path: String,
    write_all_pages: bool,
}

impl<S: Storage, R: RecommendationSource> RecommendationSession<S, R> {
    pub fn new(storage: S, controller: SubmissionController<R>, output_path: String) -> Self {
        Self {
            storage,
            controller,
            output_path,
            write_all_pages: true,
        }
    }

    pub fn with_all_pages(mut self, write_all_pages: bool) -> Self {
        self.write_all_pages = write_all_pages;
        self
    }

    pub fn controller(&self) -> &SubmissionController<R> {
        &self.controller
    }

    pub async fn run(&mut self, profile: &ProfileRequest) -> Result<SessionReport> {
        if profile.is_blank() {
            tracing::warn!("All profile fields are empty; recommendations will be generic");
        }

        match self.controller.submit(profile).await {
            SubmissionOutcome::Rendered(view) => self.export(view).await,
            SubmissionOutcome::Failed { banner, error } => {
                let document = render_document("Career Roadmaps - Error", &banner.render());
                match self
                    .storage
                    .write_file(ERROR_FILE, document.as_bytes())
                    .await
                {
                    Ok(()) => tracing::debug!("Error banner written to {}", ERROR_FILE),
                    Err(e) => tracing::warn!("Could not write {}: {}", ERROR_FILE, e),
                }
                Err(error)
            }
        }
    }

    async fn export(&self, mut view: ResultsView) -> Result<SessionReport> {
        let total = view.page_count();
        let last = if self.write_all_pages { total } else { 1 };
        let mut files = Vec::with_capacity(last + 1);

        for page in 1..=last {
            view.go_to(page);
            let title = format!("Career Roadmaps - Page {} of {}", page, total);
            let document = render_document(&title, &view.render());

            let name = page_file_name(page);
            self.storage.write_file(&name, document.as_bytes()).await?;
            if page == 1 {
                self.storage
                    .write_file(INDEX_FILE, document.as_bytes())
                    .await?;
                files.push(INDEX_FILE.to_string());
            }
            files.push(name);
        }
        view.rewind();

        tracing::info!("📄 Wrote {} file(s) to {}", files.len(), self.output_path);

        Ok(SessionReport {
            output_path: self.output_path.clone(),
            card_count: view.card_count(),
            fallback: view.is_fallback(),
            files,
            view,
        })
    }
}

impl SessionReport {
    /// Renders one page of the results region, clamped to the valid range.
    pub fn render_page(&mut self, page: usize) -> String {
        self.view.go_to(page);
        let html = self.view.render();
        self.view.rewind();
        html
    }
}
