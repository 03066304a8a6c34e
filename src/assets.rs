use crate::core::environment::EnvironmentMap;
use crate::core::model::ModelAsset;
use crate::core::ENVIRONMENT_GRID;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", url, e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("read {}: {:?}", url, e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

pub async fn load_model(url: &str) -> anyhow::Result<ModelAsset> {
    let bytes = fetch_bytes(url).await?;
    log::info!("[assets] fetched {} ({} bytes)", url, bytes.len());
    Ok(ModelAsset::from_slice(&bytes)?)
}

pub async fn load_environment(url: &str) -> anyhow::Result<EnvironmentMap> {
    let bytes = fetch_bytes(url).await?;
    let env = EnvironmentMap::from_hdr_bytes(&bytes, ENVIRONMENT_GRID)?;
    log::info!(
        "[assets] environment {} -> {}x{}",
        url,
        env.width,
        env.height
    );
    Ok(env)
}
