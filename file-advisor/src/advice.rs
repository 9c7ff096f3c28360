//! Canned conversion advice: step-by-step local commands, or a pointer to a
//! dedicated desktop tool when a file should not be converted by script.

use crate::{
    FileInfo,
    classify::{FileCategory, classify},
    formats::resolve_output_format,
};

/// Tool recommendation for families that need dedicated software.
///
/// Archives get 7-Zip, 3D models get Blender, office files get LibreOffice.
pub fn special_recommendation(category: FileCategory, extension: &str) -> Option<String> {
    match category {
        FileCategory::Archive => Some(format!(
            "## Recommendation for Archive Files (.{extension})

This is an archive file that requires a dedicated extraction tool. Instead of conversion, I recommend using 7-Zip:

1. Download 7-Zip from the official website:
```
https://www.7-zip.org/download.html
```

2. Install 7-Zip following the instructions.

3. Right-click on your {extension} file and select \"7-Zip\" > \"Extract Here\" or \"Extract to [folder]\" to unpack the contents.

7-Zip is a free, open-source file archiver that can handle {extension} files and almost all archive formats."
        )),
        FileCategory::ThreeD => Some(format!(
            "## Recommendation for 3D Files (.{extension})

This is a 3D model file that requires specialized software. I recommend using Blender:

1. Download Blender from the official website:
```
https://www.blender.org/download/
```

2. Install Blender following the instructions.

3. Open Blender, then go to File > Import > Select the appropriate format ({upper})

4. Navigate to your file and import it.

5. To export to a different format, go to File > Export > Select your desired format.

Blender is a free, open-source 3D creation suite that supports a wide range of 3D file formats.",
            upper = extension.to_uppercase()
        )),
        c if c.is_office() => Some(format!(
            "## Recommendation for Office Files (.{extension})

This is an office document that can be opened and converted with LibreOffice:

1. Download LibreOffice from the official website:
```
https://www.libreoffice.org/download/download/
```

2. Install LibreOffice following the instructions.

3. Open your {extension} file with LibreOffice.

4. To convert to another format, go to File > Save As and select your desired format.

LibreOffice is a free, open-source office suite that can handle Microsoft Office formats and many others."
        )),
        _ => None,
    }
}

/// Reply for files whose family has no conversion path at all.
pub fn unsupported_format_message(extension: &str) -> String {
    format!(
        "# Unsupported File Format

This file format (.{extension}) is not supported for conversion. I can only provide conversion commands for:

- Images (jpg, png, gif, webp, etc.)
- Videos (mp4, avi, mov, mkv, etc.)
- Audio (mp3, wav, ogg, flac, etc.)
- Documents (pdf, docx, txt, etc.)
- Spreadsheets (csv, xlsx, etc.)

For archives like ZIP or RAR files, I recommend using 7-Zip.
For 3D files, I recommend using Blender.
For Office documents, I recommend using LibreOffice."
    )
}

/// Builds the advice text for an uploaded file.
///
/// Nothing is executed; the result only describes commands for the user to
/// run locally.
pub fn build_advice(info: &FileInfo) -> String {
    let file = classify(&info.name, &info.mime_type);

    if matches!(file.category, FileCategory::Archive | FileCategory::ThreeD) {
        if let Some(rec) = special_recommendation(file.category, &file.extension) {
            return rec;
        }
    }

    let Some(output) =
        resolve_output_format(&file.extension, info.target_format.as_deref(), file.category)
    else {
        return special_recommendation(file.category, &file.extension).unwrap_or_else(|| {
            format!(
                "Converting {} is not supported. This file type ({}) cannot be reliably converted using standard tools. Please try with a different file format.",
                info.name, file.extension
            )
        });
    };

    let name = info.name.as_str();
    let base = file.base_name.as_str();
    let folder = format!("{base}_conversion");

    let mut text = format!("# Converting {name} to {output} format\n\n");
    push_step(&mut text, 1, "Create a folder for conversion", &format!("mkdir \"{folder}\""));
    push_step(&mut text, 2, "Move/Copy the file", &format!("copy \"{name}\" \"{folder}\\\""));
    push_step(&mut text, 3, "Go to the folder", &format!("cd \"{folder}\""));
    push_step(
        &mut text,
        4,
        "Install required Python packages",
        python_packages(file.category, &file.extension, &output),
    );
    push_step(
        &mut text,
        5,
        "Run the direct conversion command",
        &python_one_liner(name, base, &file.extension, &output, file.category),
    );
    text.push_str(&format!(
        "Your converted file will be saved as \"{base}_converted.{output}\" in the folder."
    ));
    text
}

fn push_step(text: &mut String, n: u8, description: &str, command: &str) {
    text.push_str(&format!("{n}. {description}: ```\n{command}```\n\n"));
}

fn python_packages(category: FileCategory, input: &str, output: &str) -> &'static str {
    match category {
        FileCategory::Image => "pip install pillow",
        FileCategory::Video => "pip install moviepy",
        FileCategory::Audio => "pip install pydub",
        FileCategory::Document => match (input, output) {
            ("pdf", "docx") => "pip install pdf2docx",
            ("docx" | "doc", "pdf") => "pip install docx2pdf",
            _ => "pip install python-docx pdf2docx PyPDF2 docx2pdf",
        },
        FileCategory::Spreadsheet => "pip install pandas openpyxl",
        _ => "# Unable to determine required packages for this file type",
    }
}

fn python_one_liner(
    name: &str,
    base: &str,
    input: &str,
    output: &str,
    category: FileCategory,
) -> String {
    let target = format!("{base}_converted.{output}");
    let done = format!("print(f'Converted {name} to {target}')");

    let body = match category {
        FileCategory::Image => format!(
            "from PIL import Image; img = Image.open('{name}'); img.save('{target}'); {done}"
        ),
        FileCategory::Video => format!(
            "from moviepy.editor import VideoFileClip; clip = VideoFileClip('{name}'); clip.write_videofile('{target}'); {done}"
        ),
        FileCategory::Audio => format!(
            "from pydub import AudioSegment; audio = AudioSegment.from_file('{name}', format='{input}'); audio.export('{target}', format='{output}'); {done}"
        ),
        FileCategory::Document => match (input, output) {
            ("pdf", "docx") => format!(
                "from pdf2docx import Converter; cv = Converter('{name}'); cv.convert('{target}'); cv.close(); {done}"
            ),
            ("docx" | "doc", "pdf") => format!(
                "from docx2pdf import convert; convert('{name}', '{target}'); {done}"
            ),
            _ => format!(
                "import os; print('File found, ready for conversion to {output}' if os.path.exists('{name}') else 'File not found: {name}'); print('Please use the appropriate conversion library for this specific format')"
            ),
        },
        FileCategory::Spreadsheet => match (input, output) {
            ("csv", "xlsx") => format!(
                "import pandas as pd; data = pd.read_csv('{name}'); data.to_excel('{target}', index=False); {done}"
            ),
            ("xlsx", "csv") => format!(
                "import pandas as pd; data = pd.read_excel('{name}'); data.to_csv('{target}', index=False); {done}"
            ),
            _ => format!(
                "import pandas as pd; data = pd.read_excel('{name}') if '{input}' in ['xlsx', 'xls'] else pd.read_csv('{name}'); data.to_excel('{target}', index=False) if '{output}' in ['xlsx', 'xls'] else data.to_csv('{target}', index=False); {done}"
            ),
        },
        _ => format!(
            "print(f'Unable to convert {name} to {output}'); print('This file type requires specialized conversion tools.')"
        ),
    };
    format!("python -c \"{body}\"")
}
