//! Landing page handler.

use axum::response::Html;

/// GET / — minimal confirmation page shown after a browser-driven
/// transfer.
pub async fn hello() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>DropVault</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            background-color: #f9f9f9;
            display: flex;
            align-items: center;
            justify-content: center;
            height: 100vh;
            margin: 0;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 10px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
            text-align: center;
            width: 300px;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Transfer Complete</h1>
    </div>
</body>
</html>
"#,
    )
}
