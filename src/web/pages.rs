use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::BookRecord;

/// Server-side rendering of the index page: crawl form, export/clear
/// actions, and the table of persisted books.
pub fn render_index(books: &[BookRecord]) -> String {
    let mut rows = String::new();
    for book in books {
        rows.push_str(&format!(
            concat!(
                "<tr>",
                "<td>{id}</td>",
                "<td><a href=\"{link}\" target=\"_blank\">{title}</a></td>",
                "<td>{author}</td>",
                "<td>{price}</td>",
                "<td>{date}</td>",
                "</tr>\n"
            ),
            id = book.id,
            link = encode_double_quoted_attribute(&book.link),
            title = encode_text(&book.title),
            author = encode_text(&book.author),
            price = encode_text(&book.price),
            date = book.crawl_date.format("%Y-%m-%d %H:%M:%S"),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>金石堂書籍爬蟲</title>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body {{ font-family: Arial, sans-serif; margin: 0; padding: 20px; }}
        .container {{ max-width: 1200px; margin: 0 auto; }}
        .form-group {{ margin-bottom: 15px; }}
        input[type="text"] {{ width: 70%; padding: 8px; }}
        button {{ padding: 8px 15px; background: #4CAF50; color: white; border: none; cursor: pointer; }}
        button:hover {{ background: #45a049; }}
        table {{ width: 100%; border-collapse: collapse; margin-top: 20px; }}
        th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
        th {{ background-color: #f2f2f2; }}
        tr:nth-child(even) {{ background-color: #f9f9f9; }}
        .actions {{ margin: 20px 0; }}
        .actions button {{ margin-right: 10px; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>金石堂書籍爬蟲系統</h1>

        <div class="form-group">
            <form action="/crawl" method="POST">
                <input type="text" name="url" placeholder="請輸入金石堂書籍頁面URL" value="https://www.kingstone.com.tw/book/nnnn">
                <button type="submit">開始爬蟲</button>
            </form>
        </div>

        <div class="actions">
            <a href="/export"><button>導出CSV</button></a>
            <a href="/clear_db" onclick="return confirm('確定要清空所有數據嗎？');"><button style="background: #f44336;">清空數據</button></a>
        </div>

        <h2>書籍列表</h2>
        <table>
            <thead>
                <tr>
                    <th>編號</th>
                    <th>書名</th>
                    <th>作者</th>
                    <th>價格</th>
                    <th>爬蟲時間</th>
                </tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>
    </div>
</body>
</html>
"#
    )
}
