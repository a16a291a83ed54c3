//! Front page HTML (self-contained, no external resources).

pub const INDEX_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>DrugSafe — Drug Interaction Checker</title>
  <style>
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #fafaf9; color: #1c1917;
      min-height: 100vh; display: flex; flex-direction: column;
      align-items: center; padding: 48px 24px;
    }
    h1 { font-size: 28px; margin-bottom: 8px; }
    .subtitle { color: #78716c; font-size: 14px; margin-bottom: 8px; text-align: center; }
    .disclaimer { color: #a8a29e; font-size: 12px; margin-bottom: 24px; text-align: center; }
    .card {
      background: white; border: 1px solid #e7e5e4; border-radius: 12px;
      padding: 24px; width: 100%; max-width: 640px; margin-bottom: 24px;
    }
    textarea {
      width: 100%; min-height: 80px; padding: 12px; font-size: 15px;
      border: 2px solid #d6d3d1; border-radius: 8px; outline: none; resize: vertical;
      font-family: inherit;
    }
    textarea:focus { border-color: #4a7c59; }
    .hint { color: #78716c; font-size: 13px; margin: 8px 0 16px; }
    .btn {
      display: inline-flex; align-items: center; justify-content: center;
      padding: 12px 24px; border-radius: 8px; font-size: 15px; font-weight: 500;
      cursor: pointer; border: none; background: #4a7c59; color: white;
    }
    .btn:disabled { opacity: 0.5; cursor: not-allowed; }
    .error { color: #dc2626; margin-top: 12px; font-size: 14px; }
    .summary { font-size: 15px; margin-bottom: 16px; }
    .risk { font-weight: 600; text-transform: uppercase; font-size: 13px; }
    .risk.low { color: #16a34a; }
    .risk.moderate { color: #d97706; }
    .risk.high, .risk.critical { color: #dc2626; }
    .interaction {
      border-left: 3px solid #d6d3d1; padding: 8px 12px; margin-bottom: 12px;
    }
    .interaction.major { border-color: #dc2626; }
    .interaction.moderate { border-color: #d97706; }
    .interaction.minor { border-color: #16a34a; }
    .pair { font-weight: 600; margin-bottom: 4px; }
    .field { font-size: 14px; color: #44403c; margin-bottom: 2px; }
    .field span { color: #78716c; }
  </style>
</head>
<body>
  <h1>DrugSafe</h1>
  <p class="subtitle">Drug interaction checker — curated formulary, openFDA data, Nemotron reasoning.</p>
  <p class="disclaimer">Not medical advice. Always consult a clinician or pharmacist.</p>

  <div class="card">
    <textarea id="meds" placeholder="Enter 2-8 medications, comma separated (e.g. warfarin, aspirin, omeprazole)"></textarea>
    <p class="hint" id="hint">Known drugs load below; any drug name can be checked.</p>
    <button class="btn" id="check-btn">Check Interactions</button>
    <p class="error" id="error" hidden></p>
  </div>

  <div class="card" id="results" hidden>
    <p class="summary" id="summary"></p>
    <p class="risk" id="risk"></p>
    <div id="interactions"></div>
  </div>

  <script>
    const medsInput = document.getElementById('meds');
    const checkBtn = document.getElementById('check-btn');
    const errorEl = document.getElementById('error');
    const resultsEl = document.getElementById('results');

    fetch('/api/drugs')
      .then(r => r.json())
      .then(data => {
        document.getElementById('hint').textContent =
          'Known drugs: ' + data.drugs.join(', ');
      })
      .catch(() => {});

    checkBtn.addEventListener('click', async () => {
      const medications = medsInput.value.split(',')
        .map(m => m.trim()).filter(m => m.length > 0);

      errorEl.hidden = true;
      resultsEl.hidden = true;
      checkBtn.disabled = true;
      checkBtn.textContent = 'Checking…';

      try {
        const response = await fetch('/api/check', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ medications }),
        });
        const data = await response.json();
        if (!response.ok) throw new Error(data.error || 'Request failed');

        document.getElementById('summary').textContent = data.summary;
        const riskEl = document.getElementById('risk');
        riskEl.textContent = 'Overall risk: ' + data.risk_score;
        riskEl.className = 'risk ' + data.risk_score;

        const list = document.getElementById('interactions');
        list.innerHTML = '';
        if (data.interactions.length === 0) {
          list.textContent = 'No interactions identified.';
        }
        for (const ix of data.interactions) {
          const div = document.createElement('div');
          div.className = 'interaction ' + ix.severity;
          div.innerHTML =
            '<p class="pair">' + ix.drug1 + ' + ' + ix.drug2 +
            ' (' + ix.severity + ')</p>' +
            '<p class="field"><span>Type:</span> ' + ix.interaction_type + '</p>' +
            '<p class="field"><span>Mechanism:</span> ' + ix.mechanism + '</p>' +
            '<p class="field"><span>Significance:</span> ' + ix.clinical_significance + '</p>' +
            '<p class="field"><span>Recommendation:</span> ' + ix.recommendation + '</p>';
          list.appendChild(div);
        }
        resultsEl.hidden = false;
      } catch (e) {
        errorEl.textContent = e.message;
        errorEl.hidden = false;
      } finally {
        checkBtn.disabled = false;
        checkBtn.textContent = 'Check Interactions';
      }
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_is_self_contained() {
        assert!(INDEX_PAGE_HTML.contains("<!DOCTYPE html>"));
        assert!(INDEX_PAGE_HTML.contains("/api/check"));
        assert!(INDEX_PAGE_HTML.contains("/api/drugs"));
        assert!(!INDEX_PAGE_HTML.contains("http://"));
        assert!(!INDEX_PAGE_HTML.contains("https://"));
    }
}
