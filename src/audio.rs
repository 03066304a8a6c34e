use crate::core::{ANALYSER_FFT_SIZE, ANALYSER_SMOOTHING};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Audio element routed through an analyser:
/// element -> media source -> analyser -> destination.
#[derive(Clone)]
pub struct AudioPipeline {
    element: web::HtmlAudioElement,
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
}

impl AudioPipeline {
    pub fn new(src: &str) -> anyhow::Result<Self> {
        let element =
            web::HtmlAudioElement::new_with_src(src).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        element.set_cross_origin(Some("anonymous"));
        element.set_preload("auto");

        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let source = ctx
            .create_media_element_source(&element)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let analyser = create_analyser(&ctx)?;
        source
            .connect_with_audio_node(&analyser)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        analyser
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        log::info!(
            "[audio] src={} fft={} bins={}",
            src,
            analyser.fft_size(),
            analyser.frequency_bin_count()
        );
        Ok(Self {
            element,
            ctx,
            analyser,
        })
    }

    pub fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    /// Resume the context if the browser suspended it, then start the
    /// element. Resolves once the play promise does.
    pub async fn start(&self) -> anyhow::Result<()> {
        if self.ctx.state() == web::AudioContextState::Suspended {
            let resume = self.ctx.resume().map_err(|e| anyhow::anyhow!("{:?}", e))?;
            JsFuture::from(resume)
                .await
                .map_err(|e| anyhow::anyhow!("resume: {:?}", e))?;
        }
        let play = self.element.play().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        JsFuture::from(play)
            .await
            .map_err(|e| anyhow::anyhow!("play: {:?}", e))?;
        Ok(())
    }

    pub fn pause(&self) {
        if let Err(e) = self.element.pause() {
            log::warn!("[audio] pause failed: {:?}", e);
        }
    }

    /// Copy the current byte frequency magnitudes into `buf`, resizing it to
    /// the analyser's bin count.
    pub fn read_frequencies(&self, buf: &mut Vec<u8>) {
        let bins = self.bin_count();
        if buf.len() != bins {
            buf.resize(bins, 0);
        }
        self.analyser.get_byte_frequency_data(buf);
    }

    pub fn on_ended(&self, mut handler: impl FnMut() + 'static) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = self
            .element
            .add_event_listener_with_callback("ended", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn create_analyser(ctx: &web::AudioContext) -> anyhow::Result<web::AnalyserNode> {
    let analyser = web::AnalyserNode::new(ctx).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    analyser.set_fft_size(ANALYSER_FFT_SIZE);
    analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
    Ok(analyser)
}
