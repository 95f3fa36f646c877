pub fn render_index(active_users: usize, habits_tracked: usize, nights_logged: usize) -> String {
    INDEX_HTML
        .replace("{{USERS}}", &active_users.to_string())
        .replace("{{HABITS}}", &habits_tracked.to_string())
        .replace("{{NIGHTS}}", &nights_logged.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habitat</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f2ea;
      --bg-2: #b7ccaf;
      --ink: #2b2a28;
      --accent: #7a936f;
      --accent-2: #8a8278;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(122, 147, 111, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ebe5dc 60%, #f8f2ea 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
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
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: var(--accent-2);
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: rgba(248, 242, 234, 0.9);
      border-radius: 18px;
      padding: 20px;
      display: grid;
      gap: 6px;
    }

    .stat span {
      color: var(--accent-2);
      font-size: 0.85rem;
      letter-spacing: 0.04em;
      text-transform: uppercase;
    }

    .stat strong {
      font-size: 1.9rem;
      font-weight: 600;
      color: var(--accent);
    }

    footer {
      color: var(--accent-2);
      font-size: 0.9rem;
    }

    code {
      background: rgba(183, 204, 175, 0.35);
      border-radius: 6px;
      padding: 2px 6px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Habitat</h1>
      <p class="subtitle">Track daily habits and nightly sleep, one calm month at a time.</p>
    </header>
    <section class="panel">
      <div class="stat">
        <span>Active users</span>
        <strong>{{USERS}}</strong>
      </div>
      <div class="stat">
        <span>Habits tracked</span>
        <strong>{{HABITS}}</strong>
      </div>
      <div class="stat">
        <span>Nights logged</span>
        <strong>{{NIGHTS}}</strong>
      </div>
    </section>
    <footer>
      The JSON API lives under <code>/api</code>; sign up via <code>POST /api/auth/signup</code>.
    </footer>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_index_substitutes_counts() {
        let html = render_index(3, 12, 40);
        assert!(html.contains("<strong>3</strong>"));
        assert!(html.contains("<strong>12</strong>"));
        assert!(html.contains("<strong>40</strong>"));
        assert!(!html.contains("{{"));
    }
}
