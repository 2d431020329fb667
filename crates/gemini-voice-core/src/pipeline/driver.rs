// Batch driver
// Sequential per-item loop; failure isolation decided by continue_on_fail

use std::sync::Arc;

use tracing::{info, warn, Instrument};
use uuid::Uuid;

use gemini_voice_types::models::{CREDENTIAL_NAME, NO_AUDIO_WARNING};
use gemini_voice_types::{BatchError, ErrorRecord, ItemConfig, ItemError, OutputProfile, OutputRecord};

use super::assembler::{assemble, assemble_audio};
use super::item_config::{prompt_for_error_record, resolve_audio_config, resolve_item_config};
use super::normalizer::{normalize, normalize_audio};
use super::request_builder::build_request;
use crate::adapters::{InlineBinaryPackager, TracingObserver};
use crate::ports::{
    BatchObserver, BinaryPackager, CredentialSource, GenerationClient, ParameterSource,
};

/// Runs a batch of items through build -> call -> normalize -> assemble.
///
/// Items are processed strictly in order and the generation call of item `i`
/// completes before item `i + 1` starts.
pub struct BatchDriver {
    client: Arc<dyn GenerationClient>,
    credentials: Arc<dyn CredentialSource>,
    packager: Arc<dyn BinaryPackager>,
    observer: Arc<dyn BatchObserver>,
    profile: OutputProfile,
    continue_on_fail: bool,
    send_speech_config: bool,
}

impl BatchDriver {
    pub fn new(client: Arc<dyn GenerationClient>, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            client,
            credentials,
            packager: Arc::new(InlineBinaryPackager),
            observer: Arc::new(TracingObserver),
            profile: OutputProfile::Chatbot,
            continue_on_fail: false,
            send_speech_config: false,
        }
    }

    pub fn with_packager(mut self, packager: Arc<dyn BinaryPackager>) -> Self {
        self.packager = packager;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn BatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub const fn profile(mut self, profile: OutputProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Send the requested voice as `speechConfig` instead of only recording it.
    pub const fn send_speech_config(mut self, enabled: bool) -> Self {
        self.send_speech_config = enabled;
        self
    }

    /// Emit an error record and keep going instead of aborting on the first failure.
    pub const fn continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }

    /// Process every item of `parameters` and return one output record per item.
    ///
    /// With `continue_on_fail` disabled the first failing item aborts the run
    /// and no partial output is returned.
    pub async fn run(
        &self,
        parameters: &dyn ParameterSource,
    ) -> Result<Vec<OutputRecord>, BatchError> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("batch", run_id = %run_id, profile = %self.profile);
        self.run_items(parameters).instrument(span).await
    }

    async fn run_items(
        &self,
        parameters: &dyn ParameterSource,
    ) -> Result<Vec<OutputRecord>, BatchError> {
        let item_count = parameters.item_count();
        info!(
            "Batch started | Items: {} | Profile: {} | Continue on fail: {}",
            item_count, self.profile, self.continue_on_fail
        );

        let mut outputs = Vec::with_capacity(item_count);
        for item_index in 0..item_count {
            match self.process_item(item_index, parameters).await {
                Ok(record) => outputs.push(record),
                Err(err) => {
                    self.observer.item_failed(item_index, &err, self.continue_on_fail);
                    if !self.continue_on_fail {
                        warn!("Batch aborted at item {} | {}", item_index, err.kind());
                        return Err(BatchError::new(item_index, err));
                    }
                    outputs.push(self.error_output(&err, item_index, parameters));
                },
            }
        }

        let failed = outputs.iter().filter(|record| record.is_error()).count();
        info!("Batch finished | Outputs: {} | Failed: {}", outputs.len(), failed);
        Ok(outputs)
    }

    async fn process_item(
        &self,
        item_index: usize,
        parameters: &dyn ParameterSource,
    ) -> Result<OutputRecord, ItemError> {
        let credentials = self
            .credentials
            .get(CREDENTIAL_NAME)
            .await
            .filter(|credentials| credentials.is_usable())
            .ok_or_else(|| ItemError::missing_credential(CREDENTIAL_NAME))?;

        let config = match self.profile {
            OutputProfile::Chatbot => resolve_item_config(parameters, item_index)?,
            OutputProfile::Tts => resolve_audio_config(parameters, item_index)?,
        };
        let speech_voice = self.speech_voice(&config);
        let request = build_request(
            &config.prompt,
            &config.model_name,
            speech_voice,
            config.enable_grounding,
        )?;

        self.observer.request_sent(item_index, &config);
        if self.profile == OutputProfile::Chatbot {
            self.observer.voice_hint(item_index, &config.voice_name, speech_voice.is_some());
        }

        let response = self
            .client
            .generate_content(&credentials.api_key, &config.model_name, &request)
            .await?;
        self.observer.response_received(item_index, &response);

        if self.profile == OutputProfile::Tts {
            let normalized = normalize_audio(&response)?;
            return Ok(assemble_audio(&config.prompt, normalized, item_index, self.packager.as_ref()));
        }

        let normalized = normalize(&response)?;
        for warning in &normalized.warnings {
            self.observer.warning_raised(item_index, warning);
        }
        if normalized.audio_bytes.is_none() {
            self.observer.warning_raised(item_index, NO_AUDIO_WARNING);
        }

        Ok(assemble(&config, normalized, item_index, self.packager.as_ref()))
    }

    fn speech_voice<'a>(&self, config: &'a ItemConfig) -> Option<&'a str> {
        (self.send_speech_config && self.profile == OutputProfile::Chatbot)
            .then_some(config.voice_name.as_str())
    }

    fn error_output(
        &self,
        err: &ItemError,
        item_index: usize,
        parameters: &dyn ParameterSource,
    ) -> OutputRecord {
        let prompt = prompt_for_error_record(parameters, item_index);
        let record = ErrorRecord::from_item_error(err, item_index, prompt);
        match self.profile {
            OutputProfile::Chatbot => record.into_output(),
            OutputProfile::Tts => record.into_tts_output(),
        }
    }
}
