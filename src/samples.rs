use crate::error::HarnessError;

/// One synthetic issue report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub number: u32,
    pub title: &'static str,
    pub body: &'static str,
}

/// The fixed catalogue, in run order.
///
/// Covers English and Chinese text across bug, feature, enhancement and
/// question reports, with Markdown features (code fences, images, tables)
/// the analyzer has to cope with.
pub fn default_samples() -> Vec<Sample> {
    vec![
        Sample {
            number: 1,
            title: "Crash when opening a file with a non-ASCII name",
            body: r#"## Describe the bug
The app panics as soon as I open `résumé.txt`.

## To Reproduce
1. Create a file named `résumé.txt`
2. Run `viewer résumé.txt`

```
thread 'main' panicked at 'byte index 3 is not a char boundary', src/path.rs:42:17
```

## Expected behavior
The file opens normally.

**Environment:** Ubuntu 22.04, v1.4.2"#,
        },
        Sample {
            number: 2,
            title: "启动时内存占用过高",
            body: r#"### 问题描述
升级到 2.0 之后，程序启动时内存占用超过 2GB，之前的版本只有 300MB 左右。

### 复现步骤
1. 安装 2.0.0 版本
2. 直接运行 `app --serve`
3. 在任务管理器中查看内存

![内存截图](https://example.com/images/memory.png)

### 环境
- 操作系统: Windows 11
- 版本: 2.0.0"#,
        },
        Sample {
            number: 3,
            title: "Feature request: export reports as CSV",
            body: r#"**Is your feature request related to a problem?**
We need to share weekly reports with people who only use spreadsheets.

**Describe the solution you'd like**
An `--format csv` option on the `export` command.

| Column | Source |
|--------|--------|
| date   | report timestamp |
| total  | sum of entries |

**Alternatives considered**
Converting the JSON output with `jq`, which is error prone."#,
        },
        Sample {
            number: 4,
            title: "希望支持深色模式",
            body: r#"晚上使用的时候界面太亮了，希望可以增加深色主题，最好能跟随系统设置自动切换。

可以参考 VS Code 的实现方式：

```json
{
  "workbench.colorTheme": "Default Dark+"
}
```"#,
        },
        Sample {
            number: 5,
            title: "Improve error message when the config file is missing",
            body: r#"Right now running without a config prints:

```
Error: No such file or directory (os error 2)
```

It would be much clearer to say which file was expected and how to create it, e.g. `Run 'app init' to create ~/.config/app/config.toml`."#,
        },
        Sample {
            number: 6,
            title: "How do I configure a proxy?",
            body: r#"I'm behind a corporate proxy and every request times out. Is there an option or environment variable for setting an HTTP proxy? I tried `HTTPS_PROXY` but it seems to be ignored.

Thanks!"#,
        },
        Sample {
            number: 7,
            title: "如何在 Docker 中运行？",
            body: r#"请问有没有官方的 Docker 镜像？我尝试自己写了一个 Dockerfile，但是构建失败：

```dockerfile
FROM rust:1.75
COPY . .
RUN cargo build --release
```

报错信息是 `linker 'cc' not found`，应该怎么解决？"#,
        },
    ]
}

/// Keep only the samples whose numbers are in `numbers`, preserving catalogue
/// order. An empty selection keeps everything.
pub fn select(samples: Vec<Sample>, numbers: &[u32]) -> Result<Vec<Sample>, HarnessError> {
    if numbers.is_empty() {
        return Ok(samples);
    }

    let mut unknown: Vec<u32> = numbers
        .iter()
        .copied()
        .filter(|n| !samples.iter().any(|s| s.number == *n))
        .collect();
    if !unknown.is_empty() {
        unknown.sort_unstable();
        unknown.dedup();
        return Err(HarnessError::UnknownSamples(unknown));
    }

    Ok(samples
        .into_iter()
        .filter(|s| numbers.contains(&s.number))
        .collect())
}
