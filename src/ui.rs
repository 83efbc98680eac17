use crate::theme::Theme;
use chrono::NaiveDate;

pub fn render_index(date: NaiveDate, greeting: &str, theme: Theme) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &date.format("%A, %B %-d").to_string())
        .replace("{{GREETING}}", greeting)
        .replace("{{THEME}}", theme.as_str())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" data-theme="{{THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>VitalTrack</title>
  <style>
    :root {
      --bg: #f7f8fa;
      --card: #ffffff;
      --ink: #1f2933;
      --muted: #7b8794;
      --line: #eef0f3;
      --accent: #3b82f6;
      --shadow: 0 12px 32px rgba(31, 41, 51, 0.08);
    }

    html[data-theme="dark"] {
      --bg: #0f141a;
      --card: #1a2129;
      --ink: #e6edf3;
      --muted: #8b98a5;
      --line: #2a333d;
    }

    @media (prefers-color-scheme: dark) {
      html[data-theme="system"] {
        --bg: #0f141a;
        --card: #1a2129;
        --ink: #e6edf3;
        --muted: #8b98a5;
        --line: #2a333d;
      }
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      display: flex;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
    }

    aside {
      width: 220px;
      padding: 24px 16px;
      display: flex;
      flex-direction: column;
      gap: 6px;
      background: var(--card);
      border-right: 1px solid var(--line);
    }

    .brand {
      font-weight: 700;
      font-size: 1.15rem;
      margin: 0 8px 20px;
    }

    .nav {
      appearance: none;
      border: none;
      background: transparent;
      color: var(--muted);
      text-align: left;
      padding: 10px 12px;
      border-radius: 12px;
      font-size: 0.95rem;
      font-weight: 500;
      cursor: pointer;
    }

    .nav.active {
      background: rgba(59, 130, 246, 0.12);
      color: var(--accent);
    }

    #theme-btn {
      margin-top: auto;
    }

    main {
      flex: 1;
      padding: 32px;
      display: grid;
      gap: 24px;
      align-content: start;
      max-width: 1040px;
    }

    h1 {
      margin: 0;
      font-size: 1.6rem;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .page[hidden] {
      display: none;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 18px;
      padding: 18px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 10px;
    }

    .card .label {
      font-size: 0.85rem;
      color: var(--muted);
    }

    .card .value {
      font-size: 1.8rem;
      font-weight: 700;
    }

    .card .unit {
      font-size: 0.85rem;
      color: var(--muted);
      margin-left: 4px;
    }

    .bar {
      height: 8px;
      border-radius: 999px;
      background: var(--line);
      overflow: hidden;
    }

    .bar > div {
      height: 100%;
      border-radius: 999px;
      background: var(--accent);
      transition: width 500ms ease;
    }

    .chart {
      width: 100%;
      height: 150px;
      display: block;
    }

    .chart-area {
      fill: rgba(59, 130, 246, 0.16);
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: var(--line);
      stroke-dasharray: 3 3;
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .row {
      display: grid;
      gap: 8px;
    }

    .row-head {
      display: flex;
      justify-content: space-between;
      font-weight: 600;
    }

    .row-head .caption {
      font-weight: 400;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .stepper {
      display: flex;
      align-items: center;
      gap: 8px;
    }

    .stepper button,
    #save-goals {
      appearance: none;
      border: none;
      border-radius: 10px;
      min-width: 36px;
      height: 36px;
      font-size: 1.1rem;
      font-weight: 700;
      cursor: pointer;
      background: var(--line);
      color: var(--ink);
    }

    .stepper button.up,
    #save-goals {
      background: var(--accent);
      color: white;
    }

    #save-goals {
      justify-self: start;
      padding: 0 20px;
      font-size: 0.95rem;
    }

    .stepper input {
      width: 110px;
      height: 36px;
      text-align: center;
      border: 1px solid var(--line);
      border-radius: 10px;
      background: var(--card);
      color: var(--ink);
      font-weight: 600;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }
  </style>
</head>
<body>
  <aside>
    <div class="brand">VitalTrack</div>
    <button class="nav active" type="button" data-page="dashboard">Dashboard</button>
    <button class="nav" type="button" data-page="log">Log Today</button>
    <button class="nav" type="button" data-page="goals">Goals</button>
    <button class="nav" type="button" id="theme-btn">Theme: {{THEME}}</button>
  </aside>

  <main>
    <section class="page" id="page-dashboard">
      <header>
        <h1>Good {{GREETING}}, Athlete!</h1>
        <p class="subtitle">{{DATE}}</p>
      </header>
      <div class="grid" id="cards"></div>
      <h2>Weekly Trends</h2>
      <div class="grid" id="trends"></div>
    </section>

    <section class="page" id="page-log" hidden>
      <header>
        <h1>Log Today's Activity</h1>
        <p class="subtitle">Values are saved when a field loses focus, on Enter, or with the step buttons.</p>
      </header>
      <div class="card" id="log-rows"></div>
    </section>

    <section class="page" id="page-goals" hidden>
      <header>
        <h1>Your Goals</h1>
        <p class="subtitle">Customise your daily targets</p>
      </header>
      <div class="card" id="goal-rows"></div>
      <button id="save-goals" type="button">Save Goals</button>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const LOG_FIELDS = [
      { metric: 'steps', label: 'Steps', unit: '', step: 500, max: 100000 },
      { metric: 'waterGlasses', label: 'Water Intake', unit: 'glasses', step: 1, max: 20 },
      { metric: 'sleepHours', label: 'Sleep', unit: 'hrs', step: 0.5, max: 24 },
      { metric: 'calories', label: 'Calories', unit: 'kcal', step: 50, max: 9999 },
      { metric: 'workoutMinutes', label: 'Workout', unit: 'min', step: 1, max: 300 },
      { metric: 'weight', label: 'Weight (optional)', unit: 'kg', step: 0.1, max: 300 }
    ];

    const GOAL_FIELDS = [
      { metric: 'steps', label: 'Daily Steps', step: 500, max: 50000 },
      { metric: 'waterGlasses', label: 'Water Glasses', step: 1, max: 30 },
      { metric: 'sleepHours', label: 'Sleep Hours', step: 0.5, max: 12 },
      { metric: 'calories', label: 'Calories', step: 100, max: 5000 },
      { metric: 'workoutMinutes', label: 'Workout Minutes', step: 1, max: 180 }
    ];

    const statusEl = document.getElementById('status');
    const cardsEl = document.getElementById('cards');
    const trendsEl = document.getElementById('trends');
    const logRowsEl = document.getElementById('log-rows');
    const goalRowsEl = document.getElementById('goal-rows');
    const themeBtn = document.getElementById('theme-btn');
    const navButtons = Array.from(document.querySelectorAll('.nav[data-page]'));

    let draftGoals = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const request = async (method, url, body) => {
      const options = { method, headers: {} };
      if (body !== undefined) {
        options.headers['content-type'] = 'application/json';
        options.body = JSON.stringify(body);
      }
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const formatValue = (value) =>
      typeof value === 'number' ? value.toLocaleString('en-US') : '--';

    const renderCards = (cards) => {
      cardsEl.innerHTML = cards
        .map((card) => {
          const goal = card.goal === null ? '' : `<span class="label">Goal: ${formatValue(card.goal)} ${card.unit || ''}</span>`;
          const bar = card.progress
            ? `<div class="bar" title="${card.progress.raw}%"><div style="width: ${card.progress.bar}%"></div></div>`
            : '';
          return `<div class="card">
            <span class="label">${card.label}</span>
            <span class="value">${formatValue(card.value)}<span class="unit">${card.unit || ''}</span></span>
            ${goal}
            ${bar}
          </div>`;
        })
        .join('');
    };

    const renderAreaChart = (points) => {
      const width = 320;
      const height = 150;
      const padX = 30;
      const padTop = 12;
      const padBottom = 24;
      const max = Math.max(1, ...points.map((p) => p.value));
      const xStep = (width - padX * 2) / Math.max(1, points.length - 1);
      const x = (i) => padX + i * xStep;
      const y = (v) => height - padBottom - (v / max) * (height - padTop - padBottom);

      const line = points.map((p, i) => `${i === 0 ? 'M' : 'L'} ${x(i).toFixed(1)} ${y(p.value).toFixed(1)}`).join(' ');
      const area = `${line} L ${x(points.length - 1).toFixed(1)} ${y(0)} L ${x(0).toFixed(1)} ${y(0)} Z`;
      let grid = '';
      for (let i = 0; i <= 2; i += 1) {
        const v = (max * i) / 2;
        grid += `<line class="chart-grid" x1="${padX}" y1="${y(v)}" x2="${width - padX}" y2="${y(v)}" />`;
        grid += `<text class="chart-label" x="${padX - 6}" y="${y(v) + 4}" text-anchor="end">${Math.round(v)}</text>`;
      }
      const labels = points
        .map((p, i) => `<text class="chart-label" x="${x(i)}" y="${height - 6}" text-anchor="middle">${p.day}</text>`)
        .join('');
      return `<svg class="chart" viewBox="0 0 ${width} ${height}">${grid}<path class="chart-area" d="${area}" /><path class="chart-line" d="${line}" />${labels}</svg>`;
    };

    const renderTrends = (trends) => {
      trendsEl.innerHTML = trends
        .map((trend) => `<div class="card"><span class="label">${trend.label} - Last 7 Days</span>${renderAreaChart(trend.points)}</div>`)
        .join('');
    };

    // Mirrors the server's staged input: typing only edits the text, the
    // server parses and clamps it on commit.
    const numberRow = (field, value, onCommit, onStep) => {
      const row = document.createElement('div');
      row.className = 'row';
      row.innerHTML = `
        <div class="row-head"><span>${field.label}</span><span class="caption"></span></div>
        <div class="stepper">
          <button type="button" class="down">-</button>
          <input type="text" inputmode="decimal" />
          <button type="button" class="up">+</button>
          <span class="caption">${field.unit || ''}</span>
        </div>`;
      const input = row.querySelector('input');
      let committed = value;
      input.value = String(value);
      input.addEventListener('focus', () => { input.value = String(committed); });
      const commit = () => onCommit(input.value).then((next) => {
        committed = next;
        input.value = String(next);
      });
      input.addEventListener('blur', () => { commit().catch((err) => setStatus(err.message, 'error')); });
      input.addEventListener('keydown', (event) => {
        if (event.key === 'Enter') {
          input.blur();
        }
      });
      const step = (direction) => onStep(direction, committed).then((next) => {
        committed = next;
        input.value = String(next);
      });
      row.querySelector('.down').addEventListener('click', () => step('decrement').catch((err) => setStatus(err.message, 'error')));
      row.querySelector('.up').addEventListener('click', () => step('increment').catch((err) => setStatus(err.message, 'error')));
      return row;
    };

    const valueOf = (record, metric) => (metric === 'weight' ? record.weight || 0 : record[metric]);

    const renderLog = (today) => {
      logRowsEl.innerHTML = '';
      LOG_FIELDS.forEach((field) => {
        const row = numberRow(
          field,
          valueOf(today.record, field.metric),
          async (raw) => {
            const next = await request('POST', '/api/today', { metric: field.metric, value: raw });
            refreshDashboard();
            return valueOf(next.record, field.metric);
          },
          async (direction) => {
            const next = await request('POST', `/api/today/${field.metric}/${direction}`);
            refreshDashboard();
            return valueOf(next.record, field.metric);
          }
        );
        logRowsEl.appendChild(row);
      });
    };

    const clampGoal = (field, value) => Math.min(field.max, Math.max(0, value));

    // Same reading as the server: leading decimal number, non-finite is invalid.
    const parseLeading = (raw) => {
      const match = /^\s*[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?/.exec(raw);
      const n = match ? Number(match[0]) : NaN;
      return Number.isFinite(n) ? n : 0;
    };

    const renderGoals = (goals) => {
      draftGoals = { ...goals };
      goalRowsEl.innerHTML = '';
      GOAL_FIELDS.forEach((field) => {
        const row = numberRow(
          field,
          goals[field.metric],
          async (raw) => {
            // The server commits the raw text; this is only the preview.
            draftGoals[field.metric] = raw;
            return clampGoal(field, parseLeading(raw));
          },
          async (direction, current) => {
            const delta = direction === 'increment' ? field.step : -field.step;
            draftGoals[field.metric] = clampGoal(field, current + delta);
            return draftGoals[field.metric];
          }
        );
        goalRowsEl.appendChild(row);
      });
    };

    const refreshDashboard = async () => {
      const dashboard = await request('GET', '/api/dashboard');
      renderCards(dashboard.cards);
      renderTrends(dashboard.trends);
    };

    const showPage = (page) => {
      navButtons.forEach((button) => button.classList.toggle('active', button.dataset.page === page));
      document.querySelectorAll('.page').forEach((section) => {
        section.hidden = section.id !== `page-${page}`;
      });
    };

    navButtons.forEach((button) => button.addEventListener('click', () => showPage(button.dataset.page)));

    document.getElementById('save-goals').addEventListener('click', () => {
      request('PUT', '/api/goals', draftGoals)
        .then((goals) => {
          renderGoals(goals);
          setStatus('Goals saved', 'ok');
          showPage('dashboard');
          return refreshDashboard();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    themeBtn.addEventListener('click', () => {
      request('POST', '/api/theme/cycle')
        .then((res) => {
          document.documentElement.dataset.theme = res.theme;
          themeBtn.textContent = `Theme: ${res.theme}`;
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    Promise.all([
      refreshDashboard(),
      request('GET', '/api/today').then((today) => {
        renderLog(today);
        renderGoals(today.goals);
      })
    ]).catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
