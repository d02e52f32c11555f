use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::documents::{extract_pdf, is_pdf_filename, ExtractedDocument};
use crate::errors::AppError;
use crate::models::extracted::Extracted;
use crate::models::job::JobRequirements;
use crate::models::links::ExtractedLinks;
use crate::pipeline::context::{MatchInput, MatchOutcome};
use crate::pipeline::MatchingPipeline;
use crate::state::AppState;

const PDF_ONLY: &str = "Only PDF files are supported";

/// One uploaded file, read fully into memory.
struct Upload {
    filename: String,
    bytes: Bytes,
}

/// Fields of a résumé upload form. Unknown fields are ignored.
#[derive(Default)]
struct UploadForm {
    files: Vec<Upload>,
    job_description: Option<String>,
}

async fn read_form(multipart: &mut Multipart, file_field: &str) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == file_field {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            form.files.push(Upload { filename, bytes });
        } else if name == "job_description" {
            form.job_description = Some(field.text().await?);
        }
    }

    Ok(form)
}

fn require_job_description(value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AppError::Validation("job_description must not be blank".into())),
    }
}

fn require_pdf(upload: &Upload) -> Result<(), AppError> {
    if !is_pdf_filename(&upload.filename) {
        return Err(AppError::UnsupportedMedia(PDF_ONLY.into()));
    }
    if upload.bytes.is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "{} is empty",
            upload.filename
        )));
    }
    Ok(())
}

/// PDF parsing is CPU-bound, so it runs off the async workers.
async fn extract_document(bytes: Bytes) -> Result<ExtractedDocument, AppError> {
    let document = tokio::task::spawn_blocking(move || extract_pdf(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))??;
    Ok(document)
}

async fn match_upload(
    pipeline: &MatchingPipeline,
    upload: Upload,
    job_description: String,
) -> Result<MatchOutcome, AppError> {
    require_pdf(&upload)?;
    let document = extract_document(upload.bytes).await?;
    pipeline
        .run(MatchInput {
            raw_text: document.raw_text,
            links: document.links,
            job_description,
        })
        .await
}

/// GET /
pub async fn handle_root() -> Json<Value> {
    Json(json!({ "message": "Resume matcher API is running" }))
}

/// GET /api-info
pub async fn handle_api_info() -> Json<Value> {
    Json(json!({
        "endpoints": {
            "/": "Service banner",
            "/health": "Health check",
            "/parse-resume": "Parse a résumé PDF and score it against a job description",
            "/parse-job-description": "Extract structured requirements from a job description",
            "/extract-resume-text": "Extract text and links from a résumé PDF without scoring",
            "/batch-parse-resumes": "Score several résumé PDFs against one job description",
            "/api-info": "This listing"
        },
        "supported_formats": ["PDF"],
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// POST /parse-resume
/// Multipart: `resume_file` (PDF) and `job_description` (text).
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchOutcome>, AppError> {
    let form = read_form(&mut multipart, "resume_file").await?;
    let upload = form
        .files
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Validation("resume_file is required".into()))?;
    require_pdf(&upload)?;
    let job_description = require_job_description(form.job_description)?;

    info!(filename = %upload.filename, "Scoring résumé");
    let outcome = match_upload(&state.pipeline, upload, job_description).await?;
    Ok(Json(outcome))
}

#[derive(Deserialize)]
pub struct JobDescriptionRequest {
    pub job_description: String,
}

#[derive(Serialize)]
pub struct JobDescriptionResponse {
    pub job_info: Extracted<JobRequirements>,
    pub message: &'static str,
}

/// POST /parse-job-description
pub async fn handle_parse_job_description(
    State(state): State<AppState>,
    Json(req): Json<JobDescriptionRequest>,
) -> Result<Json<JobDescriptionResponse>, AppError> {
    let job_description = require_job_description(Some(req.job_description))?;
    let job_info = state.pipeline.extract_job(&job_description).await?;
    Ok(Json(JobDescriptionResponse {
        job_info,
        message: "Job description parsed successfully",
    }))
}

#[derive(Serialize)]
pub struct ExtractTextResponse {
    pub raw_text: String,
    pub links_info: ExtractedLinks,
    pub message: &'static str,
}

/// POST /extract-resume-text
pub async fn handle_extract_resume_text(
    mut multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, AppError> {
    let form = read_form(&mut multipart, "resume_file").await?;
    let upload = form
        .files
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Validation("resume_file is required".into()))?;
    require_pdf(&upload)?;

    let document = extract_document(upload.bytes).await?;
    Ok(Json(ExtractTextResponse {
        raw_text: document.raw_text,
        links_info: document.links,
        message: "Text extracted successfully",
    }))
}

/// Outcome for one file of a batch. A failed file carries `error` and no scores.
#[derive(Debug, Serialize)]
pub struct BatchItem {
    pub filename: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub result: Option<MatchOutcome>,
}

impl BatchItem {
    fn from_result(filename: String, result: Result<MatchOutcome, AppError>) -> Self {
        match result {
            Ok(outcome) => Self {
                filename,
                success: true,
                error: None,
                result: Some(outcome),
            },
            Err(e) => {
                warn!(%filename, "Batch item failed: {e}");
                Self {
                    filename,
                    success: false,
                    error: Some(e.public_message()),
                    result: None,
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchItem>,
    pub total_processed: usize,
    pub successful: usize,
    pub failed: usize,
}

impl BatchResponse {
    fn new(results: Vec<BatchItem>) -> Self {
        let successful = results.iter().filter(|r| r.success).count();
        Self {
            total_processed: results.len(),
            successful,
            failed: results.len() - successful,
            results,
        }
    }
}

/// Runs one task per named job, at most `concurrency` at a time, and returns
/// the items in input order regardless of completion order.
async fn run_bounded<T, F, Fut>(
    jobs: Vec<(String, T)>,
    concurrency: usize,
    run: F,
) -> Vec<BatchItem>
where
    T: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<MatchOutcome, AppError>> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut handles = Vec::with_capacity(jobs.len());

    for (filename, job) in jobs {
        let semaphore = semaphore.clone();
        let task = run(job);
        let handle = tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| AppError::Internal(e.into()))?;
            task.await
        });
        handles.push((filename, handle));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (filename, handle) in handles {
        let result = handle.await.unwrap_or_else(|e| {
            Err(AppError::Internal(anyhow::anyhow!("Batch task failed: {e}")))
        });
        results.push(BatchItem::from_result(filename, result));
    }
    results
}

/// POST /batch-parse-resumes
/// Multipart: repeated `resume_files` and one `job_description`. Files run
/// concurrently up to `BATCH_CONCURRENCY`; results keep upload order and a
/// failing file never aborts the batch.
pub async fn handle_batch_parse_resumes(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchResponse>, AppError> {
    let form = read_form(&mut multipart, "resume_files").await?;
    if form.files.is_empty() {
        return Err(AppError::Validation("resume_files is required".into()));
    }
    let job_description = require_job_description(form.job_description)?;

    info!(files = form.files.len(), "Batch scoring started");
    let jobs = form
        .files
        .into_iter()
        .map(|upload| (upload.filename.clone(), upload))
        .collect();
    let pipeline = state.pipeline.clone();
    let results = run_bounded(jobs, state.config.batch_concurrency, move |upload| {
        let pipeline = pipeline.clone();
        let job_description = job_description.clone();
        async move { match_upload(&pipeline, upload, job_description).await }
    })
    .await;

    let response = BatchResponse::new(results);
    info!(
        successful = response.successful,
        failed = response.failed,
        "Batch scoring finished"
    );
    Ok(Json(response))
}
