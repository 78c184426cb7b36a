pub fn render_index(source: Option<&str>) -> String {
    let source = match source {
        Some(description) => escape_html(description),
        None => "not configured".to_string(),
    };
    INDEX_HTML.replace("{{SOURCE}}", &source)
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Page View Tracker</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(980px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: flex-end;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    .latest-list {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .latest-item {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .latest-item p {
      margin: 0;
    }

    .latest-item .label {
      font-weight: 600;
      color: var(--accent-2);
    }

    .latest-item .date,
    .latest-item .change {
      font-size: 0.85rem;
      color: #8b857d;
    }

    .latest-item .views {
      font-size: 1.4rem;
      font-weight: 600;
      color: var(--accent);
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      button {
        width: 100%;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Page View Tracker</h1>
        <p class="subtitle">Daily Wikipedia views per article, with day-over-day change.</p>
      </div>
      <button id="refresh" type="button">Refresh</button>
    </header>

    <div class="status" id="status"></div>

    <section>
      <h2>Latest</h2>
      <div class="latest-list" id="latestList"></div>
    </section>

    <section class="chart-card">
      <canvas id="percentChangeChart" height="280"></canvas>
    </section>

    <section class="chart-card">
      <canvas id="viewsMAChart" height="280"></canvas>
    </section>

    <p class="hint">Source: {{SOURCE}}. Every refresh re-reads the whole collection.</p>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const latestListEl = document.getElementById('latestList');
    const refreshBtn = document.getElementById('refresh');

    // one live Chart per canvas; the old one is destroyed before a new one is made
    const slots = { percentChangeChart: null, viewsMAChart: null };

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const tickFormatters = {
      percent: (value) => `${value}%`,
      views: (value) => Math.round(value).toLocaleString()
    };

    const releaseSlot = (slot) => {
      if (slots[slot]) {
        slots[slot].destroy();
        slots[slot] = null;
      }
    };

    const renderChart = (slot, config, pointRadius) => {
      releaseSlot(slot);
      const ctx = document.getElementById(slot);
      if (!ctx || typeof Chart === 'undefined') return;

      slots[slot] = new Chart(ctx, {
        type: 'line',
        data: {
          labels: config.labels,
          datasets: config.datasets.map((dataset) => ({
            label: dataset.label,
            data: dataset.data,
            borderColor: dataset.borderColor,
            backgroundColor: dataset.backgroundColor,
            spanGaps: dataset.spanGaps,
            tension: dataset.tension,
            tooltips: dataset.tooltips
          }))
        },
        options: {
          responsive: true,
          interaction: { intersect: false, mode: 'index' },
          plugins: {
            title: { display: true, text: config.title },
            tooltip: {
              callbacks: {
                label: (item) => item.dataset.tooltips[item.dataIndex]
              }
            },
            legend: { position: 'bottom' }
          },
          scales: {
            y: {
              title: { display: true, text: config.y_axis },
              ticks: { callback: tickFormatters[config.tick_format] }
            }
          },
          elements: {
            line: { borderWidth: 1.5 },
            point: { radius: pointRadius, hitRadius: 6, hoverRadius: pointRadius + 2 }
          }
        }
      });
    };

    const renderLatest = (cards) => {
      latestListEl.innerHTML = '';
      if (!cards.length) {
        latestListEl.innerHTML = '<p>No documents found yet.</p>';
        return;
      }

      cards.forEach((card) => {
        const item = document.createElement('div');
        item.className = 'latest-item';
        [
          ['label', card.label],
          ['date', card.date],
          ['views', card.views],
          ['change', card.change]
        ].forEach(([className, text]) => {
          const p = document.createElement('p');
          p.className = className;
          p.textContent = text;
          item.appendChild(p);
        });
        latestListEl.appendChild(item);
      });
    };

    const load = async () => {
      setStatus('Loading documents…', 'info');
      refreshBtn.disabled = true;
      try {
        const res = await fetch('/api/dashboard');
        if (!res.ok) {
          const msg = await res.text();
          throw new Error(msg || 'Could not load data');
        }
        const dashboard = await res.json();

        renderLatest(dashboard.latest);
        renderChart('percentChangeChart', dashboard.charts.percent_change, 2);
        renderChart('viewsMAChart', dashboard.charts.views_average, 0);
        setStatus(dashboard.message || '', dashboard.status === 'empty' ? 'info' : '');
      } catch (err) {
        console.error(err);
        releaseSlot('percentChangeChart');
        releaseSlot('viewsMAChart');
        latestListEl.innerHTML = '';
        setStatus(err.message, 'error');
      } finally {
        refreshBtn.disabled = false;
      }
    };

    refreshBtn.addEventListener('click', () => load());
    load();
  </script>
</body>
</html>
"#;
