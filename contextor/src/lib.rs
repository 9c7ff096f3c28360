//! Conversion chat gateway.
//!
//! Public API: [`ChatPipeline::answer`]. For file uploads it builds local
//! conversion advice (asking the provider to refine it only for large files).
//! For everything else it retrieves formula context from the on-disk corpus,
//! picks exactly one prompt template and calls the provider.

mod api_types;
mod cfg;
mod error;
pub mod intent;
pub mod prompt;

pub use api_types::{ChatAnswer, ChatRequest};
pub use cfg::{ContextorConfig, DEFAULT_LARGE_FILE_THRESHOLD};
pub use error::ContextorError;
pub use prompt::PromptKind;

use ai_llm_service::TextGenerator;
use file_advisor::{FileCategory, FileInfo};
use formula_store::FormulaCorpus;
use tracing::{debug, info, instrument};

/// Stateless per request; holds only the corpus loader and knobs.
pub struct ChatPipeline {
    corpus: FormulaCorpus,
    large_file_threshold: u64,
}

impl ChatPipeline {
    /// # Errors
    /// Returns [`ContextorError::Formula`] if the corpus config is invalid.
    pub fn new(cfg: ContextorConfig) -> Result<Self, ContextorError> {
        let corpus = FormulaCorpus::new(cfg.corpus_config())?;
        Ok(Self {
            corpus,
            large_file_threshold: cfg.large_file_threshold,
        })
    }

    pub fn corpus(&self) -> &FormulaCorpus {
        &self.corpus
    }

    /// Answers one chat turn.
    ///
    /// `llm` is only called when a template is chosen; canned file advice,
    /// tool recommendations and unsupported-format replies never reach it.
    ///
    /// # Errors
    /// - [`ContextorError::Validation`] if `message` or `api_key` is blank
    /// - [`ContextorError::Llm`] if the provider call fails
    ///
    /// # Example
    /// ```no_run
    /// # use contextor::{ChatPipeline, ChatRequest, ContextorConfig};
    /// # use ai_llm_service::{LlmDispatcher, ProviderSettings, ProviderSelector};
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pipeline = ChatPipeline::new(ContextorConfig::from_env())?;
    /// let req = ChatRequest::new("convert 5 km to miles", "sk-...");
    /// let provider = ProviderSelector::resolve(req.provider, &req.api_key);
    /// let llm = LlmDispatcher::new(&ProviderSettings::from_env()?, provider, &req.api_key);
    /// let answer = pipeline.answer(&req, &llm).await?;
    /// println!("{}", answer.response);
    /// # Ok(()) }
    /// ```
    #[instrument(name = "chat_answer", skip_all, fields(has_file = req.file_info.is_some(), has_context = req.conversion_context.is_some()))]
    pub async fn answer<G: TextGenerator>(
        &self,
        req: &ChatRequest,
        llm: &G,
    ) -> Result<ChatAnswer, ContextorError> {
        // 1) Validate
        if req.message.trim().is_empty() || req.api_key.trim().is_empty() {
            return Err(ContextorError::Validation("Missing message or API key"));
        }
        let message = req.message.as_str();

        // 2) File upload or file question
        if let Some(info) = &req.file_info {
            return self.answer_file(info, llm).await;
        }
        if intent::is_file_conversion_query(message) {
            return generate(llm, prompt::file_help(message), PromptKind::FileHelp).await;
        }

        // 3) Formula context: keyword retrieval, replaced by the selected
        //    category's full document when one resolves.
        let mut formula = self.corpus.retrieve(message).text;
        if let Some(ctx) = &req.conversion_context {
            if let Some(doc) = self.corpus.for_context(&ctx.category) {
                formula = doc.content.to_string();
            }
        }

        // 4) Pick the template
        let bare = intent::is_bare_number(message);
        let is_calc = intent::is_calculation_query(message)
            || !formula.is_empty()
            || intent::has_digit(message)
            || req.conversion_context.is_some();

        let (kind, text) = if !is_calc {
            (PromptKind::Decline, prompt::decline(message))
        } else if let Some(ctx) = &req.conversion_context {
            (
                PromptKind::ContextConversion,
                prompt::context_conversion(message, ctx, &formula),
            )
        } else if bare {
            (PromptKind::BareNumber, prompt::bare_number(message, &formula))
        } else {
            (
                PromptKind::GeneralCalculation,
                prompt::general_calculation(message, &formula),
            )
        };
        debug!(template = %kind, formula_chars = formula.len(), "template selected");

        // 5) Call the provider
        generate(llm, text, kind).await
    }

    async fn answer_file<G: TextGenerator>(
        &self,
        info: &FileInfo,
        llm: &G,
    ) -> Result<ChatAnswer, ContextorError> {
        let file = info.descriptor();

        match file.category {
            FileCategory::Archive | FileCategory::ThreeD => {
                if let Some(rec) =
                    file_advisor::special_recommendation(file.category, &file.extension)
                {
                    info!(category = %file.category, "tool recommendation for upload");
                    return Ok(ChatAnswer::canned(rec));
                }
            }
            FileCategory::Unknown => {
                info!(extension = %file.extension, "unsupported upload");
                return Ok(ChatAnswer::canned(file_advisor::unsupported_format_message(
                    &file.extension,
                )));
            }
            _ => {}
        }

        let canned = file_advisor::build_advice(info);
        if info.size_bytes < self.large_file_threshold {
            debug!(size = info.size_bytes, "returning canned conversion commands");
            return Ok(ChatAnswer::canned(canned));
        }

        info!(
            size = info.size_bytes,
            threshold = self.large_file_threshold,
            "large upload; asking provider to refine commands"
        );
        generate(llm, prompt::file_refinement(info, &canned), PromptKind::FileRefinement).await
    }
}

async fn generate<G: TextGenerator>(
    llm: &G,
    text: String,
    kind: PromptKind,
) -> Result<ChatAnswer, ContextorError> {
    let response = llm.generate(&text, Some(prompt::DEFAULT_SYSTEM)).await?;
    Ok(ChatAnswer::generated(response, kind))
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Mutex};

    use ai_llm_service::{AiLlmError, LlmProvider, ProviderError, ProviderErrorKind};
    use formula_store::ConversionContext;

    use super::*;

    /// Records every prompt and answers with a fixed reply.
    #[derive(Default)]
    struct Recorder {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl Recorder {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    impl TextGenerator for Recorder {
        async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
            assert_eq!(system, Some(prompt::DEFAULT_SYSTEM));
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(AiLlmError::GenerationFailed {
                    provider: LlmProvider::Gemini,
                    source: Box::new(
                        ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::EmptyChoices)
                            .into(),
                    ),
                });
            }
            Ok("1. Do it: ```\nffmpeg -i in.mov out.mp4```".to_string())
        }
    }

    const LENGTH: &str = "Length Conversions\nunits of distance\n\n\n\n\
General Formula\nresult = value * factor\n\n\n\n\n\
1 kilometer = 1000 meter\n1 mile = 1.609344 kilometer\n\
Example\n5 kilometer = 3.106856 mile\n";

    fn pipeline() -> (tempfile::TempDir, ChatPipeline) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("length.txt"), LENGTH).unwrap();
        fs::write(dir.path().join("mass.txt"), "Mass\n1 kilogram = 1000 gram\n").unwrap();
        let cfg = ContextorConfig {
            formulas_dir: dir.path().to_path_buf(),
            large_file_threshold: DEFAULT_LARGE_FILE_THRESHOLD,
        };
        (dir, ChatPipeline::new(cfg).unwrap())
    }

    fn upload(name: &str, mime: &str, size: u64) -> ChatRequest {
        ChatRequest {
            file_info: Some(FileInfo {
                name: name.into(),
                mime_type: mime.into(),
                size_bytes: size,
                target_format: None,
            }),
            ..ChatRequest::new(format!("convert {name}"), "AIza-key")
        }
    }

    #[tokio::test]
    async fn km_to_miles_uses_general_template_with_formula() {
        let (_dir, p) = pipeline();
        let llm = Recorder::default();

        let ans = p
            .answer(&ChatRequest::new("convert 5 km to miles", "sk-x"), &llm)
            .await
            .unwrap();

        assert_eq!(ans.template, Some(PromptKind::GeneralCalculation));
        assert!(ans.steps.is_none());
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("1 mile = 1.609344 kilometer"));
        assert!(prompts[0].contains("EXACT conversion factors"));
    }

    #[tokio::test]
    async fn unrelated_message_is_declined() {
        let (_dir, p) = pipeline();
        let llm = Recorder::default();
        let ans = p
            .answer(&ChatRequest::new("what is your name", "k"), &llm)
            .await
            .unwrap();
        assert_eq!(ans.template, Some(PromptKind::Decline));
        assert!(llm.prompts()[0].contains("Politely decline"));
    }

    #[tokio::test]
    async fn bare_number_asks_for_units() {
        let (_dir, p) = pipeline();
        let llm = Recorder::default();
        let ans = p.answer(&ChatRequest::new(" 42 ", "k"), &llm).await.unwrap();
        assert_eq!(ans.template, Some(PromptKind::BareNumber));
        assert!(llm.prompts()[0].contains("only a numeric value: 42"));
    }

    #[tokio::test]
    async fn context_loads_full_document() {
        let (_dir, p) = pipeline();
        let llm = Recorder::default();
        let req = ChatRequest {
            conversion_context: Some(ConversionContext {
                from: "Kilograms".into(),
                to: "Grams".into(),
                category: "Mass/Weight".into(),
            }),
            ..ChatRequest::new("5", "k")
        };

        let ans = p.answer(&req, &llm).await.unwrap();
        assert_eq!(ans.template, Some(PromptKind::ContextConversion));
        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Mass\n1 kilogram = 1000 gram\n"));
        assert!(prompt.contains("Please perform the conversion of 5 Kilograms to Grams."));
    }

    #[tokio::test]
    async fn context_without_document_still_converts() {
        let (_dir, p) = pipeline();
        let llm = Recorder::default();
        let req = ChatRequest {
            conversion_context: Some(ConversionContext {
                from: "Hours".into(),
                to: "Minutes".into(),
                category: "Time".into(),
            }),
            ..ChatRequest::new("hello", "k")
        };
        let ans = p.answer(&req, &llm).await.unwrap();
        assert_eq!(ans.template, Some(PromptKind::ContextConversion));
        assert!(!llm.prompts()[0].contains("EXACT"));
    }

    #[tokio::test]
    async fn small_upload_returns_canned_commands() {
        let (_dir, p) = pipeline();
        let llm = Recorder::default();

        let ans = p
            .answer(&upload("photo.HEIC", "image/heic", 500_000), &llm)
            .await
            .unwrap();

        assert!(llm.prompts().is_empty());
        assert_eq!(ans.template, None);
        assert!(ans.response.contains("mkdir \"photo_conversion\""));
        assert!(ans.response.contains("photo_converted.png"));
        let steps = ans.steps.unwrap();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[2].command, "cd \"photo_conversion\"");
    }

    #[tokio::test]
    async fn large_upload_is_refined_by_provider() {
        let (_dir, p) = pipeline();
        let llm = Recorder::default();

        let ans = p
            .answer(&upload("photo.HEIC", "image/heic", 20_000_000), &llm)
            .await
            .unwrap();

        assert_eq!(ans.template, Some(PromptKind::FileRefinement));
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("mkdir \"photo_conversion\""));
        assert!(prompts[0].contains("File size: 20000000 bytes"));
        assert_eq!(ans.steps.unwrap()[0].command, "ffmpeg -i in.mov out.mp4");
    }

    #[tokio::test]
    async fn threshold_size_goes_to_provider() {
        let (_dir, p) = pipeline();

        let llm = Recorder::default();
        let ans = p
            .answer(&upload("logo.png", "image/png", 10_000_000), &llm)
            .await
            .unwrap();
        assert_eq!(ans.template, Some(PromptKind::FileRefinement));
        assert_eq!(llm.prompts().len(), 1);

        let llm = Recorder::default();
        let ans = p
            .answer(&upload("logo.png", "image/png", 9_999_999), &llm)
            .await
            .unwrap();
        assert_eq!(ans.template, None);
        assert!(ans.response.contains("logo_converted.jpg"));
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn archives_models_and_unknown_files_never_call_provider() {
        let (_dir, p) = pipeline();
        let llm = Recorder::failing();

        let zip = p
            .answer(&upload("bundle.zip", "application/zip", 50_000_000), &llm)
            .await
            .unwrap();
        assert!(zip.response.contains("7-Zip"));

        let blend = p
            .answer(&upload("ship.blend", "", 50_000_000), &llm)
            .await
            .unwrap();
        assert!(blend.response.contains("Blender"));

        let exe = p
            .answer(&upload("setup.exe", "application/x-msdownload", 1), &llm)
            .await
            .unwrap();
        assert!(exe.response.starts_with("# Unsupported File Format"));

        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn file_question_without_upload_gets_help() {
        let (_dir, p) = pipeline();
        let llm = Recorder::default();
        let ans = p
            .answer(&ChatRequest::new("how do I convert image files?", "k"), &llm)
            .await
            .unwrap();
        assert_eq!(ans.template, Some(PromptKind::FileHelp));
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let (_dir, p) = pipeline();
        let llm = Recorder::default();
        let err = p
            .answer(&ChatRequest::new("  ", "k"), &llm)
            .await
            .unwrap_err();
        assert!(matches!(err, ContextorError::Validation(_)));
        let err = p
            .answer(&ChatRequest::new("5 km", ""), &llm)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing message or API key");
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let (_dir, p) = pipeline();
        let err = p
            .answer(&ChatRequest::new("convert 5 km to miles", "k"), &Recorder::failing())
            .await
            .unwrap_err();
        assert!(matches!(err, ContextorError::Llm(_)));
        assert!(err.to_string().starts_with("generation failed for provider gemini"));
    }
}
