//! The single page served at `/`.

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI News Brief</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 0; display: flex; color: #222; }
  aside { width: 16rem; padding: 1.5rem; background: #f4f5f7; min-height: 100vh; box-sizing: border-box; }
  main { flex: 1; max-width: 46rem; margin: 0 auto; padding: 2rem 1.5rem; }
  form { display: flex; gap: .5rem; flex-wrap: wrap; }
  input[type=url] { flex: 1; min-width: 16rem; padding: .6rem; }
  button { padding: .6rem 1rem; cursor: pointer; }
  .notice { padding: .8rem 1rem; border-radius: .4rem; margin-top: 1rem; }
  .warning { background: #fff4d6; }
  .error { background: #fde2e1; }
  .summary { background: #e3f6e8; padding: 1rem; border-radius: .4rem; }
  .metrics { display: flex; gap: 1rem; margin-top: 1.5rem; }
  .metric { flex: 1; }
  .metric b { display: block; font-size: 1.6rem; }
  img { max-width: 100%; border-radius: .4rem; }
  hr { margin: 1.5rem 0; border: none; border-top: 1px solid #ddd; }
</style>
</head>
<body>
<aside>
  <h3>About</h3>
  <p>Paste a news link and get a short abstractive summary written by a language model.
     Long articles are truncated before they reach the model.</p>
</aside>
<main>
  <h1>&#128240; AI News Summarizer</h1>
  <p>Turn long news articles into quick, readable summaries.</p>
  <form id="form">
    <input type="url" id="url" placeholder="https://www.bbc.com/news/..." aria-label="News URL">
    <select id="profile" aria-label="Summary profile"></select>
    <button type="submit" id="submit">Generate Summary</button>
  </form>
  <div id="result"></div>
</main>
<script>
const $ = (id) => document.getElementById(id);

function esc(s) {
  const d = document.createElement("div");
  d.textContent = s == null ? "" : String(s);
  return d.innerHTML;
}

fetch("/api/profiles").then(r => r.json()).then(body => {
  for (const p of body.data || []) {
    const o = document.createElement("option");
    o.value = p.name;
    o.textContent = `${p.name} (${p.min_length}-${p.max_length} words)`;
    $("profile").appendChild(o);
  }
});

$("form").addEventListener("submit", async (ev) => {
  ev.preventDefault();
  const out = $("result");
  $("submit").disabled = true;
  out.innerHTML = '<p class="notice">Reading the article...</p>';
  try {
    const res = await fetch("/api/summarize", {
      method: "POST",
      headers: { "content-type": "application/json" },
      body: JSON.stringify({ url: $("url").value, profile: $("profile").value || null }),
    });
    const body = await res.json();
    if (!body.data) {
      out.innerHTML = `<p class="notice ${esc(body.meta.status)}">${esc(body.meta.message)}</p>`;
      return;
    }
    const d = body.data;
    out.innerHTML = `
      <hr><h2>Title: ${esc(d.title)}</h2>
      ${d.top_image ? `<img src="${esc(d.top_image)}" alt="">` : ""}
      <h3>AI Summary</h3>
      <div class="summary">${esc(d.summary)}</div>
      <hr>
      <div class="metrics">
        <div class="metric">Original Words<b>${d.metrics.original_words}</b></div>
        <div class="metric">Summary Words<b>${d.metrics.summary_words}</b></div>
        <div class="metric">Time Taken<b>${d.metrics.elapsed_secs}s</b></div>
      </div>`;
  } catch (e) {
    out.innerHTML = `<p class="notice error">An error occurred: ${esc(e)}</p>`;
  } finally {
    $("submit").disabled = false;
  }
});
</script>
</body>
</html>
"#;
