//! Static step catalogue for the diagnostic flow

/// Format class of a free-text answer; selects sanitizer and validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatClass {
    #[default]
    Plain,
    Name,
    Email,
    Phone,
    Url,
}

/// Kind of input a step presents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Free text, single or multi-line
    Text { multiline: bool },
    /// Option cards: exactly one may be selected
    SingleSelect(&'static [&'static str]),
    /// Checkbox cards: at least one must be checked
    MultiSelect(&'static [&'static str]),
}

/// One question of the wizard. Never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    /// 1-based step index
    pub index: usize,
    /// Key under which the answer is stored
    pub key: &'static str,
    pub prompt: &'static str,
    pub hint: &'static str,
    pub kind: InputKind,
    pub format: FormatClass,
    pub required: bool,
    /// Quick suggestions appended to multi-line answers
    pub suggestions: &'static [&'static str],
}

impl StepDefinition {
    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, InputKind::Text { multiline: true })
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self.kind {
            InputKind::SingleSelect(options) | InputKind::MultiSelect(options) => options,
            InputKind::Text { .. } => &[],
        }
    }
}

const fn text(
    index: usize,
    key: &'static str,
    prompt: &'static str,
    hint: &'static str,
    format: FormatClass,
    required: bool,
) -> StepDefinition {
    StepDefinition {
        index,
        key,
        prompt,
        hint,
        kind: InputKind::Text { multiline: false },
        format,
        required,
        suggestions: &[],
    }
}

const fn long_text(
    index: usize,
    key: &'static str,
    prompt: &'static str,
    hint: &'static str,
    required: bool,
    suggestions: &'static [&'static str],
) -> StepDefinition {
    StepDefinition {
        index,
        key,
        prompt,
        hint,
        kind: InputKind::Text { multiline: true },
        format: FormatClass::Plain,
        required,
        suggestions,
    }
}

const fn single(
    index: usize,
    key: &'static str,
    prompt: &'static str,
    options: &'static [&'static str],
) -> StepDefinition {
    StepDefinition {
        index,
        key,
        prompt,
        hint: "Escolha uma opção",
        kind: InputKind::SingleSelect(options),
        format: FormatClass::Plain,
        required: true,
        suggestions: &[],
    }
}

const fn multi(
    index: usize,
    key: &'static str,
    prompt: &'static str,
    options: &'static [&'static str],
) -> StepDefinition {
    StepDefinition {
        index,
        key,
        prompt,
        hint: "Marque quantas quiser",
        kind: InputKind::MultiSelect(options),
        format: FormatClass::Plain,
        required: true,
        suggestions: &[],
    }
}

/// Number of questions in the diagnostic flow
pub const TOTAL_STEPS: usize = 17;

pub static DIAGNOSTIC_STEPS: [StepDefinition; TOTAL_STEPS] = [
    text(1, "nome", "Qual é o seu nome?", "Como podemos te chamar", FormatClass::Name, true),
    text(2, "empresa", "Qual é o nome da sua empresa?", "Nome fantasia", FormatClass::Plain, true),
    text(3, "email", "Qual é o seu melhor e-mail?", "voce@empresa.com.br", FormatClass::Email, true),
    text(4, "whatsapp", "Qual é o seu WhatsApp?", "(71) 99999-9999", FormatClass::Phone, true),
    text(5, "site_atual", "Sua empresa já tem site?", "Deixe em branco se ainda não tiver", FormatClass::Url, false),
    single(6, "segmento", "Em qual segmento sua empresa atua?", &[
        "Comércio",
        "Serviços",
        "Indústria",
        "Saúde",
        "Educação",
        "Outro",
    ]),
    single(7, "tamanho_equipe", "Quantas pessoas trabalham na empresa?", &[
        "Só eu",
        "2 a 5",
        "6 a 20",
        "Mais de 20",
    ]),
    single(8, "tempo_mercado", "Há quanto tempo a empresa existe?", &[
        "Menos de 1 ano",
        "1 a 3 anos",
        "3 a 10 anos",
        "Mais de 10 anos",
    ]),
    multi(9, "canais_atuais", "Onde sua empresa está presente hoje?", &[
        "Instagram",
        "Facebook",
        "WhatsApp Business",
        "Google Meu Negócio",
        "Site próprio",
        "Nenhum",
    ]),
    long_text(10, "principal_desafio", "Qual é o maior desafio do seu negócio hoje?", "Conte com suas palavras", true, &[
        "Poucos clientes",
        "Falta de tempo",
        "Concorrência forte",
        "Pouca visibilidade online",
    ]),
    multi(11, "objetivos", "O que você quer alcançar nos próximos meses?", &[
        "Atrair mais clientes",
        "Vender online",
        "Fortalecer a marca",
        "Automatizar o atendimento",
        "Aparecer no Google",
    ]),
    long_text(12, "publico_alvo", "Quem é o seu cliente ideal?", "Idade, região, interesses", true, &[]),
    text(13, "concorrentes", "Quais concorrentes você admira?", "Opcional", FormatClass::Plain, false),
    single(14, "investimento", "Quanto pretende investir?", &[
        "Até 1 mil reais",
        "De 1 a 3 mil reais",
        "De 3 a 10 mil reais",
        "Acima de 10 mil reais",
    ]),
    single(15, "prazo", "Para quando você precisa do projeto?", &[
        "Urgente (até 15 dias)",
        "Em até 1 mês",
        "Em até 3 meses",
        "Sem pressa",
    ]),
    multi(16, "servicos_interesse", "Quais serviços te interessam?", &[
        "Site institucional",
        "Landing page",
        "Loja virtual",
        "Identidade visual",
        "Tráfego pago",
        "Manutenção",
    ]),
    long_text(17, "observacoes", "Algo mais que devemos saber?", "Opcional", false, &[]),
];

/// Look up a step by its 1-based index
pub fn step(index: usize) -> Option<&'static StepDefinition> {
    index.checked_sub(1).and_then(|i| DIAGNOSTIC_STEPS.get(i))
}
